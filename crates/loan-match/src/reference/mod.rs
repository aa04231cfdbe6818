//! Reference sets backing the policy catalog: serviceable pincodes and negative-industry
//! keywords per lender, loaded from CSV files at startup.
//!
//! Loading never fails as a whole. A file that is missing or malformed is logged and every
//! lender mapped to it gets an empty set, which the pincode check treats as "reject all".

mod parser;

pub use parser::{parse_negative_industries, parse_pincodes};

use std::collections::{BTreeSet, HashMap};
use std::fs::File;
use std::path::{Path, PathBuf};

use tracing::{info, warn};

use crate::eligibility::lenders;

/// Failure reading a single reference file.
#[derive(Debug, thiserror::Error)]
pub enum ReferenceDataError {
    #[error("failed to open reference file {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("invalid reference CSV: {0}")]
    Csv(#[from] csv::Error),
    #[error("pincode '{value}' is not an integer")]
    InvalidPincode { value: String },
}

/// Reference files feeding one lender's rule, relative to the data directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReferenceSource {
    pub lender: String,
    pub pincode_file: Option<String>,
    pub negative_industry_file: Option<String>,
}

/// Mapping from lender to its reference files.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReferenceManifest {
    sources: Vec<ReferenceSource>,
}

impl ReferenceManifest {
    pub fn new(sources: Vec<ReferenceSource>) -> Self {
        Self { sources }
    }

    /// File layout used by the production data directory.
    pub fn standard() -> Self {
        const BAJAJ_NEGATIVE: &str = "bajaj_negative_industry.csv";
        const LTFS_NEGATIVE: &str = "ltfs_negative_industries.csv";

        let entries: [(&str, &str, &str); 12] = [
            (lenders::INDIFI_TERM_LOAN, "indifi_pincode.csv", BAJAJ_NEGATIVE),
            (lenders::KOTAK_TERM_LOAN, "kotak_pincode.csv", BAJAJ_NEGATIVE),
            (lenders::BAJAJ_TERM_LOAN, "bajaj_pincode.csv", BAJAJ_NEGATIVE),
            (lenders::BAJAJ_STBL_LITE, "bajaj_pincode.csv", BAJAJ_NEGATIVE),
            (lenders::BAJAJ_STBL, "bajaj_pincode.csv", BAJAJ_NEGATIVE),
            (
                lenders::FLEXI_TERM_LOAN,
                "flexi_pincode.csv",
                "flexi_negative_industry.csv",
            ),
            (lenders::KOTAK_CA_PROGRAM, "kotak_pincode.csv", BAJAJ_NEGATIVE),
            (lenders::LT_TERM_LOAN, "ltfs_pincode.csv", LTFS_NEGATIVE),
            (lenders::LT_CA_PROGRAM, "ltfs_pincode.csv", LTFS_NEGATIVE),
            (lenders::HERO_TERM_LOAN, "hero_pincode.csv", LTFS_NEGATIVE),
            (
                lenders::CREDIT_SAISON_SBA,
                "credit_saison_pincode.csv",
                LTFS_NEGATIVE,
            ),
            (
                lenders::CREDIT_SAISON_UBL,
                "credit_saison_pincode.csv",
                LTFS_NEGATIVE,
            ),
        ];

        Self::new(
            entries
                .into_iter()
                .map(|(lender, pincodes, negative)| ReferenceSource {
                    lender: lender.to_string(),
                    pincode_file: Some(pincodes.to_string()),
                    negative_industry_file: Some(negative.to_string()),
                })
                .collect(),
        )
    }

    pub fn sources(&self) -> &[ReferenceSource] {
        &self.sources
    }
}

/// Loaded reference data keyed by lender name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReferenceSets {
    pub pincodes: HashMap<String, BTreeSet<u32>>,
    pub negative_industries: HashMap<String, BTreeSet<String>>,
}

impl ReferenceSets {
    /// Read every file named by the manifest from `data_dir`. Files shared by several
    /// lenders are parsed once.
    pub fn load(data_dir: &Path, manifest: &ReferenceManifest) -> Self {
        let mut sets = Self::default();
        let mut pincode_files: HashMap<&str, BTreeSet<u32>> = HashMap::new();
        let mut industry_files: HashMap<&str, BTreeSet<String>> = HashMap::new();

        for source in manifest.sources() {
            if let Some(file) = source.pincode_file.as_deref() {
                let pincodes = pincode_files
                    .entry(file)
                    .or_insert_with(|| load_or_empty(data_dir, file, parse_pincodes));
                info!(lender = %source.lender, count = pincodes.len(), "serviceable pincodes loaded");
                sets.pincodes
                    .insert(source.lender.clone(), pincodes.clone());
            }

            if let Some(file) = source.negative_industry_file.as_deref() {
                let keywords = industry_files
                    .entry(file)
                    .or_insert_with(|| load_or_empty(data_dir, file, parse_negative_industries));
                info!(lender = %source.lender, count = keywords.len(), "negative industries loaded");
                sets.negative_industries
                    .insert(source.lender.clone(), keywords.clone());
            }
        }

        sets
    }

    /// Serviceable pincodes for a lender; empty when none were loaded.
    pub fn pincodes_for(&self, lender: &str) -> BTreeSet<u32> {
        self.pincodes.get(lender).cloned().unwrap_or_default()
    }

    /// Negative-industry keywords for a lender; empty when none were loaded.
    pub fn negative_industries_for(&self, lender: &str) -> BTreeSet<String> {
        self.negative_industries
            .get(lender)
            .cloned()
            .unwrap_or_default()
    }
}

fn load_or_empty<T: Default>(
    data_dir: &Path,
    file: &str,
    parse: fn(File) -> Result<T, ReferenceDataError>,
) -> T {
    let path = data_dir.join(file);
    match read_file(&path, parse) {
        Ok(value) => value,
        Err(err) => {
            warn!(path = %path.display(), error = %err, "reference file unavailable; lenders using it get an empty set");
            T::default()
        }
    }
}

fn read_file<T>(
    path: &Path,
    parse: fn(File) -> Result<T, ReferenceDataError>,
) -> Result<T, ReferenceDataError> {
    let file = File::open(path).map_err(|source| ReferenceDataError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse(file)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::sync::atomic::{AtomicU32, Ordering};

    fn scratch_dir() -> PathBuf {
        static COUNTER: AtomicU32 = AtomicU32::new(0);
        let dir = std::env::temp_dir().join(format!(
            "loan-match-reference-{}-{}",
            std::process::id(),
            COUNTER.fetch_add(1, Ordering::Relaxed)
        ));
        fs::create_dir_all(&dir).expect("scratch dir");
        dir
    }

    fn manifest() -> ReferenceManifest {
        ReferenceManifest::new(vec![
            ReferenceSource {
                lender: "Alpha (Term Loan)".to_string(),
                pincode_file: Some("shared_pincode.csv".to_string()),
                negative_industry_file: Some("negative.csv".to_string()),
            },
            ReferenceSource {
                lender: "Beta (Term Loan)".to_string(),
                pincode_file: Some("shared_pincode.csv".to_string()),
                negative_industry_file: Some("missing.csv".to_string()),
            },
        ])
    }

    #[test]
    fn shared_files_feed_every_mapped_lender() {
        let dir = scratch_dir();
        fs::write(dir.join("shared_pincode.csv"), "pincode\n560001\n560002\n").expect("write");
        fs::write(dir.join("negative.csv"), "negative_industries\nScrap\n").expect("write");

        let sets = ReferenceSets::load(&dir, &manifest());

        assert_eq!(
            sets.pincodes_for("Alpha (Term Loan)"),
            BTreeSet::from([560001, 560002])
        );
        assert_eq!(
            sets.pincodes_for("Beta (Term Loan)"),
            sets.pincodes_for("Alpha (Term Loan)")
        );
        assert_eq!(
            sets.negative_industries_for("Alpha (Term Loan)"),
            BTreeSet::from(["scrap".to_string()])
        );
        fs::remove_dir_all(dir).ok();
    }

    #[test]
    fn missing_or_malformed_files_degrade_to_empty_sets() {
        let dir = scratch_dir();
        fs::write(dir.join("shared_pincode.csv"), "pincode\nnot-a-pincode\n").expect("write");

        let sets = ReferenceSets::load(&dir, &manifest());

        assert!(sets.pincodes.contains_key("Alpha (Term Loan)"));
        assert!(sets.pincodes_for("Alpha (Term Loan)").is_empty());
        assert!(sets.negative_industries_for("Beta (Term Loan)").is_empty());
        assert!(sets.pincodes_for("Unknown Lender").is_empty());
        fs::remove_dir_all(dir).ok();
    }

    #[test]
    fn standard_manifest_covers_every_lender() {
        let manifest = ReferenceManifest::standard();
        let mapped: BTreeSet<&str> = manifest
            .sources()
            .iter()
            .map(|source| source.lender.as_str())
            .collect();
        let table: BTreeSet<&str> = crate::eligibility::standard_lenders().collect();
        assert_eq!(mapped, table);
    }
}
