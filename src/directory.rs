//! Remote hospital directory client.
//!
//! The hospital directory and the hospital-to-specialty mapping live as two
//! externally hosted static JSON documents, fetched over plain HTTPS GET
//! and parsed as arrays. They stand in for what would otherwise be two more
//! database tables and change rarely, so each call simply fetches the whole
//! document; there is no caching or retry here.

use crate::errors::{Error, Result};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// One hospital in the remote directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HospitalRecord {
    /// Stable hospital code, referenced by cutoffs and the specialty map
    pub code: String,
    /// Display name
    pub name: String,
    /// City
    pub city: String,
    /// Region (comunidad autónoma)
    pub region: String,
}

/// One hospital-to-specialty link in the remote mapping.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HospitalSpecialty {
    /// Hospital code from the directory
    pub hospital_code: String,
    /// Specialty code
    pub specialty_code: String,
    /// Training places offered per year
    pub places: u32,
}

/// Client for the two static directory documents.
#[derive(Clone)]
pub struct DirectoryClient {
    client: Client,
    hospitals_url: String,
    specialties_url: String,
}

impl DirectoryClient {
    /// Creates a client for the given document URLs.
    #[must_use]
    pub fn new(hospitals_url: String, specialties_url: String) -> Self {
        Self {
            client: Client::new(),
            hospitals_url,
            specialties_url,
        }
    }

    /// Creates a client from `HOSPITAL_DIRECTORY_URL` and
    /// `HOSPITAL_SPECIALTY_MAP_URL` environment variables.
    pub fn from_env() -> Result<Self> {
        let hospitals_url = std::env::var("HOSPITAL_DIRECTORY_URL").map_err(|_| Error::Config {
            message: "HOSPITAL_DIRECTORY_URL not set".to_string(),
        })?;
        let specialties_url =
            std::env::var("HOSPITAL_SPECIALTY_MAP_URL").map_err(|_| Error::Config {
                message: "HOSPITAL_SPECIALTY_MAP_URL not set".to_string(),
            })?;
        Ok(Self::new(hospitals_url, specialties_url))
    }

    /// GET one of the documents and parse it as a JSON array.
    async fn get_json<T: serde::de::DeserializeOwned>(&self, url: &str) -> Result<Vec<T>> {
        let resp = self.client.get(url).send().await?;

        if !resp.status().is_success() {
            let status = resp.status();
            let text = resp.text().await.unwrap_or_default();
            return Err(Error::Directory {
                message: format!("GET {url} failed: {status} - {text}"),
            });
        }

        resp.json().await.map_err(Into::into)
    }

    /// Fetches the full hospital directory.
    pub async fn fetch_hospitals(&self) -> Result<Vec<HospitalRecord>> {
        let hospitals = self.get_json(&self.hospitals_url).await?;
        debug!(count = hospitals.len(), "Fetched hospital directory");
        Ok(hospitals)
    }

    /// Fetches the full hospital-to-specialty mapping.
    pub async fn fetch_specialty_links(&self) -> Result<Vec<HospitalSpecialty>> {
        let links = self.get_json(&self.specialties_url).await?;
        debug!(count = links.len(), "Fetched hospital-specialty map");
        Ok(links)
    }
}

/// Hospitals located in the given region.
#[must_use]
pub fn hospitals_in_region<'a>(
    hospitals: &'a [HospitalRecord],
    region: &str,
) -> Vec<&'a HospitalRecord> {
    hospitals.iter().filter(|h| h.region == region).collect()
}

/// Hospitals offering the given specialty according to the mapping.
#[must_use]
pub fn hospitals_offering<'a>(
    hospitals: &'a [HospitalRecord],
    links: &[HospitalSpecialty],
    specialty_code: &str,
) -> Vec<&'a HospitalRecord> {
    let offering: std::collections::HashSet<&str> = links
        .iter()
        .filter(|link| link.specialty_code == specialty_code)
        .map(|link| link.hospital_code.as_str())
        .collect();

    hospitals
        .iter()
        .filter(|h| offering.contains(h.code.as_str()))
        .collect()
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;

    const HOSPITALS_JSON: &str = r#"[
        {"code": "h1", "name": "Hospital Clínico San Carlos", "city": "Madrid", "region": "Madrid"},
        {"code": "h2", "name": "Hospital del Mar", "city": "Barcelona", "region": "Cataluña"}
    ]"#;

    const LINKS_JSON: &str = r#"[
        {"hospital_code": "h1", "specialty_code": "cgd", "places": 4},
        {"hospital_code": "h2", "specialty_code": "ped", "places": 2}
    ]"#;

    #[test]
    fn test_parse_hospital_directory() {
        let hospitals: Vec<HospitalRecord> = serde_json::from_str(HOSPITALS_JSON).unwrap();
        assert_eq!(hospitals.len(), 2);
        assert_eq!(hospitals[0].code, "h1");
        assert_eq!(hospitals[0].name, "Hospital Clínico San Carlos");
        assert_eq!(hospitals[1].region, "Cataluña");
    }

    #[test]
    fn test_parse_specialty_map() {
        let links: Vec<HospitalSpecialty> = serde_json::from_str(LINKS_JSON).unwrap();
        assert_eq!(links.len(), 2);
        assert_eq!(links[0].hospital_code, "h1");
        assert_eq!(links[0].specialty_code, "cgd");
        assert_eq!(links[0].places, 4);
    }

    #[test]
    fn test_hospitals_in_region() {
        let hospitals: Vec<HospitalRecord> = serde_json::from_str(HOSPITALS_JSON).unwrap();
        let madrid = hospitals_in_region(&hospitals, "Madrid");
        assert_eq!(madrid.len(), 1);
        assert_eq!(madrid[0].code, "h1");

        assert!(hospitals_in_region(&hospitals, "Galicia").is_empty());
    }

    #[test]
    fn test_hospitals_offering() {
        let hospitals: Vec<HospitalRecord> = serde_json::from_str(HOSPITALS_JSON).unwrap();
        let links: Vec<HospitalSpecialty> = serde_json::from_str(LINKS_JSON).unwrap();

        let surgery = hospitals_offering(&hospitals, &links, "cgd");
        assert_eq!(surgery.len(), 1);
        assert_eq!(surgery[0].code, "h1");

        assert!(hospitals_offering(&hospitals, &links, "derm").is_empty());
    }
}
