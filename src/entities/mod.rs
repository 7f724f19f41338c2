//! Entity module - Contains all SeaORM entity definitions for the database.
//! These entities represent the database tables and their relationships.
//! Each entity has a Model struct for data and an Entity struct for operations.

pub mod app_state;
pub mod cutoff;
pub mod entry;
pub mod event;
pub mod node;
pub mod profile;
pub mod review;
pub mod rotation;
pub mod shift;

// Re-export specific types to avoid conflicts
pub use app_state::{Column as AppStateColumn, Entity as AppState, Model as AppStateModel};
pub use cutoff::{Column as CutoffColumn, Entity as Cutoff, Model as CutoffModel};
pub use entry::{Column as EntryColumn, Entity as Entry, Model as EntryModel};
pub use event::{Column as EventColumn, Entity as Event, Model as EventModel};
pub use node::{Column as NodeColumn, Entity as Node, Model as NodeModel};
pub use profile::{Column as ProfileColumn, Entity as Profile, Model as ProfileModel};
pub use review::{Column as ReviewColumn, Entity as Review, Model as ReviewModel};
pub use rotation::{Column as RotationColumn, Entity as Rotation, Model as RotationModel};
pub use shift::{Column as ShiftColumn, Entity as Shift, Model as ShiftModel};
