//! Admission chance estimation from historical cutoff ranks.
//!
//! Given a candidate's exam rank (lower is better) and a target specialty,
//! estimates the admission probability for every hospital offering that
//! specialty from up to seven years of historical cutoff ranks. A year with
//! no record is absent data, not a zero; a hospital with no valid years at
//! all reports the distinct "NA" state, which is never rendered as "0%"
//! and sorts after every numeric result.

use crate::{
    directory::{HospitalRecord, HospitalSpecialty},
    entities::{Cutoff, cutoff},
    errors::{Error, Result},
};
use sea_orm::prelude::*;
use std::cmp::Ordering;
use std::collections::HashMap;
use std::fmt;

/// Years of historical cutoff data considered by the estimator.
pub const CUTOFF_YEARS: [i32; 7] = [2019, 2020, 2021, 2022, 2023, 2024, 2025];

/// Estimated admission chance for one hospital.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Chance {
    /// Rounded percentage of valid years whose cutoff admitted this rank
    Percent(i32),
    /// No valid historical data points: not zero, unknown
    Insufficient,
}

impl fmt::Display for Chance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Percent(percent) => write!(f, "{percent}%"),
            Self::Insufficient => write!(f, "NA"),
        }
    }
}

/// One hospital's estimate with the data points behind it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HospitalChance {
    /// Hospital code as used by the remote directory
    pub hospital_code: String,
    /// Hospital display name
    pub hospital_name: String,
    /// The estimate
    pub chance: Chance,
    /// Year to cutoff rank, None where no record exists for that year
    pub cutoffs: Vec<(i32, Option<i32>)>,
}

/// Estimates the chance for one hospital from its per-year cutoffs.
///
/// `cutoffs` holds one element per considered year, None where that year
/// has no record. The estimate is `round(100 * matches / valid_years)`
/// where a year matches when `user_rank <= cutoff`.
#[must_use]
pub fn estimate(user_rank: i32, cutoffs: &[Option<i32>]) -> Chance {
    let valid: Vec<i32> = cutoffs.iter().flatten().copied().collect();
    if valid.is_empty() {
        return Chance::Insufficient;
    }

    let matches = valid.iter().filter(|c| user_rank <= **c).count();

    // Cast safety: matches <= valid.len() <= 7, percentage is in [0, 100].
    #[allow(clippy::cast_possible_truncation, clippy::cast_precision_loss)]
    let percent = (100.0 * matches as f64 / valid.len() as f64).round() as i32;
    Chance::Percent(percent)
}

/// Sorts results: descending probability, "NA" after all numeric results,
/// ties broken by hospital name ascending.
pub fn rank_results(results: &mut [HospitalChance]) {
    results.sort_by(|a, b| match (a.chance, b.chance) {
        (Chance::Percent(x), Chance::Percent(y)) => y
            .cmp(&x)
            .then_with(|| a.hospital_name.cmp(&b.hospital_name)),
        (Chance::Percent(_), Chance::Insufficient) => Ordering::Less,
        (Chance::Insufficient, Chance::Percent(_)) => Ordering::Greater,
        (Chance::Insufficient, Chance::Insufficient) => a.hospital_name.cmp(&b.hospital_name),
    });
}

/// Estimates admission chances for every hospital offering a specialty.
///
/// Candidate hospitals come from the remote directory plus its
/// hospital-to-specialty mapping; historical cutoffs come from the
/// database. The optional region filter narrows the candidates before any
/// estimation happens.
pub async fn admission_outlook(
    db: &DatabaseConnection,
    hospitals: &[HospitalRecord],
    links: &[HospitalSpecialty],
    user_rank: i32,
    specialty_code: &str,
    region: Option<&str>,
) -> Result<Vec<HospitalChance>> {
    if user_rank <= 0 {
        return Err(Error::InvalidRank { rank: user_rank });
    }

    let offering: std::collections::HashSet<&str> = links
        .iter()
        .filter(|link| link.specialty_code == specialty_code)
        .map(|link| link.hospital_code.as_str())
        .collect();

    let candidates: Vec<&HospitalRecord> = hospitals
        .iter()
        .filter(|h| offering.contains(h.code.as_str()))
        .filter(|h| region.is_none_or(|r| h.region == r))
        .collect();

    // One query for the whole specialty, grouped by hospital afterwards
    let rows = Cutoff::find()
        .filter(cutoff::Column::SpecialtyCode.eq(specialty_code))
        .all(db)
        .await?;

    let mut by_hospital: HashMap<&str, HashMap<i32, i32>> = HashMap::new();
    for row in &rows {
        by_hospital
            .entry(row.hospital_code.as_str())
            .or_default()
            .insert(row.year, row.cutoff_rank);
    }

    let mut results: Vec<HospitalChance> = candidates
        .into_iter()
        .map(|hospital| {
            let years = by_hospital.get(hospital.code.as_str());
            let cutoffs: Vec<(i32, Option<i32>)> = CUTOFF_YEARS
                .iter()
                .map(|year| (*year, years.and_then(|y| y.get(year).copied())))
                .collect();
            let points: Vec<Option<i32>> = cutoffs.iter().map(|(_, rank)| *rank).collect();

            HospitalChance {
                hospital_code: hospital.code.clone(),
                hospital_name: hospital.name.clone(),
                chance: estimate(user_rank, &points),
                cutoffs,
            }
        })
        .collect();

    rank_results(&mut results);
    Ok(results)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::test_utils::{create_test_cutoff, setup_test_db};

    fn chance_row(name: &str, chance: Chance) -> HospitalChance {
        HospitalChance {
            hospital_code: name.to_lowercase(),
            hospital_name: name.to_string(),
            chance,
            cutoffs: Vec::new(),
        }
    }

    #[test]
    fn test_estimate_mixed_years() {
        // 2025: 1500, 2024: no record, 2023: 1800, rank 1600.
        // Valid years are 2025 and 2023; only 2023 admits this rank.
        let cutoffs = vec![Some(1500), None, Some(1800)];
        let chance = estimate(1600, &cutoffs);
        assert_eq!(chance, Chance::Percent(50));
        assert_eq!(chance.to_string(), "50%");
    }

    #[test]
    fn test_estimate_no_valid_years_is_na_not_zero() {
        let chance = estimate(1600, &[None, None, None]);
        assert_eq!(chance, Chance::Insufficient);
        assert_eq!(chance.to_string(), "NA");
        assert_ne!(chance.to_string(), "0%");

        let chance = estimate(1600, &[]);
        assert_eq!(chance, Chance::Insufficient);
    }

    #[test]
    fn test_estimate_rank_equal_to_cutoff_counts() {
        let chance = estimate(1500, &[Some(1500)]);
        assert_eq!(chance, Chance::Percent(100));
    }

    #[test]
    fn test_estimate_rounds_to_nearest_integer() {
        // 1 of 3 = 33.33 -> 33
        let chance = estimate(100, &[Some(150), Some(50), Some(60)]);
        assert_eq!(chance, Chance::Percent(33));

        // 2 of 3 = 66.67 -> 67
        let chance = estimate(100, &[Some(150), Some(120), Some(60)]);
        assert_eq!(chance, Chance::Percent(67));
    }

    #[test]
    fn test_estimate_zero_percent_is_rendered_as_zero() {
        let chance = estimate(5000, &[Some(1500), Some(1800)]);
        assert_eq!(chance, Chance::Percent(0));
        assert_eq!(chance.to_string(), "0%");
    }

    #[test]
    fn test_rank_results_order() {
        let mut results = vec![
            chance_row("Hospital Clínico", Chance::Percent(80)),
            chance_row("Hospital del Mar", Chance::Insufficient),
            chance_row("Hospital La Paz", Chance::Percent(40)),
            chance_row("Hospital Central", Chance::Insufficient),
        ];

        rank_results(&mut results);

        let rendered: Vec<String> = results.iter().map(|r| r.chance.to_string()).collect();
        assert_eq!(rendered, vec!["80%", "40%", "NA", "NA"]);
        // NA entries among themselves are ordered by hospital name ascending
        assert_eq!(results[2].hospital_name, "Hospital Central");
        assert_eq!(results[3].hospital_name, "Hospital del Mar");
    }

    #[test]
    fn test_rank_results_percent_ties_by_name() {
        let mut results = vec![
            chance_row("Hospital B", Chance::Percent(50)),
            chance_row("Hospital A", Chance::Percent(50)),
        ];
        rank_results(&mut results);
        assert_eq!(results[0].hospital_name, "Hospital A");
        assert_eq!(results[1].hospital_name, "Hospital B");
    }

    fn hospital(code: &str, name: &str, region: &str) -> HospitalRecord {
        HospitalRecord {
            code: code.to_string(),
            name: name.to_string(),
            city: "Madrid".to_string(),
            region: region.to_string(),
        }
    }

    fn link(hospital_code: &str, specialty_code: &str) -> HospitalSpecialty {
        HospitalSpecialty {
            hospital_code: hospital_code.to_string(),
            specialty_code: specialty_code.to_string(),
            places: 1,
        }
    }

    #[tokio::test]
    async fn test_admission_outlook_integration() -> Result<()> {
        let db = setup_test_db().await?;

        create_test_cutoff(&db, "h1", "cgd", 2025, 1500).await?;
        create_test_cutoff(&db, "h1", "cgd", 2023, 1800).await?;
        create_test_cutoff(&db, "h2", "cgd", 2025, 3000).await?;
        // Cutoffs for another specialty must not leak into the estimate
        create_test_cutoff(&db, "h1", "ped", 2025, 100).await?;

        let hospitals = vec![
            hospital("h1", "Hospital Clínico", "Madrid"),
            hospital("h2", "Hospital del Mar", "Cataluña"),
            hospital("h3", "Hospital Central", "Madrid"),
        ];
        let links = vec![link("h1", "cgd"), link("h2", "cgd"), link("h3", "cgd")];

        let results = admission_outlook(&db, &hospitals, &links, 1600, "cgd", None).await?;
        assert_eq!(results.len(), 3);

        // h2 admits 1600 in its only valid year, h1 in one of two,
        // h3 has no data at all
        assert_eq!(results[0].hospital_name, "Hospital del Mar");
        assert_eq!(results[0].chance, Chance::Percent(100));
        assert_eq!(results[1].hospital_name, "Hospital Clínico");
        assert_eq!(results[1].chance, Chance::Percent(50));
        assert_eq!(results[2].hospital_name, "Hospital Central");
        assert_eq!(results[2].chance, Chance::Insufficient);

        // Seven data points per hospital, absent years as None
        assert_eq!(results[0].cutoffs.len(), CUTOFF_YEARS.len());
        let h1 = &results[1];
        assert!(h1.cutoffs.contains(&(2025, Some(1500))));
        assert!(h1.cutoffs.contains(&(2024, None)));
        assert!(h1.cutoffs.contains(&(2023, Some(1800))));
        Ok(())
    }

    #[tokio::test]
    async fn test_admission_outlook_region_filter() -> Result<()> {
        let db = setup_test_db().await?;
        create_test_cutoff(&db, "h1", "cgd", 2025, 1500).await?;

        let hospitals = vec![
            hospital("h1", "Hospital Clínico", "Madrid"),
            hospital("h2", "Hospital del Mar", "Cataluña"),
        ];
        let links = vec![link("h1", "cgd"), link("h2", "cgd")];

        let results =
            admission_outlook(&db, &hospitals, &links, 1000, "cgd", Some("Madrid")).await?;
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].hospital_name, "Hospital Clínico");
        Ok(())
    }

    #[tokio::test]
    async fn test_admission_outlook_rejects_bad_rank() -> Result<()> {
        let db = setup_test_db().await?;
        let result = admission_outlook(&db, &[], &[], 0, "cgd", None).await;
        assert!(matches!(result.unwrap_err(), Error::InvalidRank { rank: 0 }));
        Ok(())
    }
}
