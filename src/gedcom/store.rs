use std::collections::HashMap;
use std::path::Path;
use std::str::FromStr;

use super::parser::{parse_records, GedcomRecord};
use super::{Family, FamilyGraph, Sex, Xref};
use crate::error::{GedgraphError, Result};

/// Name components of an individual
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PersonName {
    pub prefix: Option<String>,
    pub given: Option<String>,
    pub surname: Option<String>,
    pub suffix: Option<String>,
}

impl PersonName {
    /// Build from a `NAME` record.
    ///
    /// Sub-tags win over the slash-delimited `NAME` value: prefix comes from
    /// `NPFX` (else `TITL`), then `GIVN`, `SURN`, `NSFX`.
    pub fn from_record(name: &GedcomRecord) -> Self {
        let (given, surname, suffix) = name
            .value()
            .map(split_name_value)
            .unwrap_or((None, None, None));

        Self {
            prefix: non_empty(name.child_value("NPFX"))
                .or_else(|| non_empty(name.child_value("TITL"))),
            given: non_empty(name.child_value("GIVN")).or(given),
            surname: non_empty(name.child_value("SURN")).or(surname),
            suffix: non_empty(name.child_value("NSFX")).or(suffix),
        }
    }

    /// `PREFIX GIVEN SURNAME SUFFIX`, or `Unknown` when nothing is recorded
    pub fn display(&self) -> String {
        let parts: Vec<&str> = [&self.prefix, &self.given, &self.surname, &self.suffix]
            .into_iter()
            .filter_map(|p| p.as_deref())
            .collect();

        if parts.is_empty() {
            "Unknown".to_string()
        } else {
            parts.join(" ")
        }
    }
}

/// An `INDI` record reduced to what charts need
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Individual {
    pub xref: Xref,
    pub name: PersonName,
    pub sex: Sex,
    pub birth_year: Option<String>,
    pub death_year: Option<String>,
    /// `FAMC` pointers, in file order
    pub child_families: Vec<Xref>,
    /// `FAMS` pointers, in file order
    pub spouse_families: Vec<Xref>,
}

impl Individual {
    fn from_record(xref: Xref, record: &GedcomRecord) -> Self {
        let name = record
            .child("NAME")
            .map(PersonName::from_record)
            .unwrap_or_default();

        Self {
            xref,
            name,
            sex: record.child_value("SEX").map(Sex::from_code).unwrap_or(Sex::Unknown),
            // Baptism/christening stand in for a missing birth date, burial for death
            birth_year: event_year(record, &["BIRT", "BAPM", "CHR"]),
            death_year: event_year(record, &["DEAT", "BURI"]),
            child_families: pointers(record, "FAMC"),
            spouse_families: pointers(record, "FAMS"),
        }
    }
}

/// In-memory GEDCOM individuals and families
#[derive(Debug, Clone, Default)]
pub struct GedcomStore {
    individuals: HashMap<Xref, Individual>,
    families: HashMap<Xref, Family>,
}

impl GedcomStore {
    /// Load and index a GEDCOM file
    pub fn from_path(path: &Path) -> Result<Self> {
        let bytes = std::fs::read(path).map_err(GedgraphError::Io)?;
        // Older exports are often Latin-1/ANSEL; keep going with replacement chars
        let content = String::from_utf8_lossy(&bytes);
        let store: Self = content.parse()?;

        log::info!(
            "Loaded {} individuals and {} families from {}",
            store.individual_count(),
            store.family_count(),
            path.display()
        );
        Ok(store)
    }

    /// Index `INDI` and `FAM` level-0 records; everything else is ignored.
    pub fn from_records(records: &[GedcomRecord]) -> Self {
        let mut store = Self::default();

        for record in records {
            let xref = match &record.xref {
                Some(x) => Xref::new(x),
                None => continue,
            };

            match record.tag.as_str() {
                "INDI" => {
                    let individual = Individual::from_record(xref.clone(), record);
                    store.individuals.insert(xref, individual);
                }
                "FAM" => {
                    let family = Family {
                        xref: xref.clone(),
                        husband: pointer(record, "HUSB"),
                        wife: pointer(record, "WIFE"),
                        children: pointers(record, "CHIL"),
                        married: record.child("MARR").is_some(),
                    };
                    store.families.insert(xref, family);
                }
                _ => {}
            }
        }

        store
    }

    /// Look up an individual by raw or canonical id
    pub fn individual(&self, id: &str) -> Option<&Individual> {
        self.individuals.get(&Xref::new(id))
    }

    pub fn individual_count(&self) -> usize {
        self.individuals.len()
    }

    pub fn family_count(&self) -> usize {
        self.families.len()
    }

    /// Keep only ids that point at a loaded individual
    fn existing(&self, xref: Option<&Xref>) -> Option<Xref> {
        xref.filter(|x| self.individuals.contains_key(*x)).cloned()
    }
}

impl FromStr for GedcomStore {
    type Err = GedgraphError;

    fn from_str(content: &str) -> Result<Self> {
        let records = parse_records(content)?;
        Ok(Self::from_records(&records))
    }
}

impl FamilyGraph for GedcomStore {
    fn resolve(&self, id: &str) -> Option<Xref> {
        let xref = Xref::new(id);
        self.individuals.contains_key(&xref).then_some(xref)
    }

    fn parents(&self, id: &Xref) -> (Option<Xref>, Option<Xref>) {
        let family = self
            .individuals
            .get(id)
            .and_then(|ind| ind.child_families.first())
            .and_then(|fam| self.families.get(fam));

        match family {
            Some(family) => (
                self.existing(family.husband.as_ref()),
                self.existing(family.wife.as_ref()),
            ),
            None => (None, None),
        }
    }

    fn children(&self, id: &Xref) -> Vec<Xref> {
        self.spouse_families(id)
            .into_iter()
            .flat_map(|family| family.children.iter())
            .filter(|child| self.individuals.contains_key(*child))
            .cloned()
            .collect()
    }

    fn spouse_families(&self, id: &Xref) -> Vec<&Family> {
        match self.individuals.get(id) {
            Some(ind) => ind
                .spouse_families
                .iter()
                .filter_map(|fam| self.families.get(fam))
                .collect(),
            None => Vec::new(),
        }
    }

    fn sex(&self, id: &Xref) -> Sex {
        self.individuals.get(id).map_or(Sex::Unknown, |ind| ind.sex)
    }

    fn display_name(&self, id: &Xref) -> String {
        self.individuals
            .get(id)
            .map_or_else(|| "Unknown".to_string(), |ind| ind.name.display())
    }

    fn birth_year(&self, id: &Xref) -> Option<String> {
        self.individuals.get(id).and_then(|ind| ind.birth_year.clone())
    }

    fn death_year(&self, id: &Xref) -> Option<String> {
        self.individuals.get(id).and_then(|ind| ind.death_year.clone())
    }
}

/// Split `Given /Surname/ Suffix` into its three parts.
fn split_name_value(value: &str) -> (Option<String>, Option<String>, Option<String>) {
    let mut parts = value.splitn(3, '/');
    let given = non_empty(parts.next());
    let surname = non_empty(parts.next());
    let suffix = non_empty(parts.next());
    (given, surname, suffix)
}

fn non_empty(value: Option<&str>) -> Option<String> {
    value.map(str::trim).filter(|v| !v.is_empty()).map(str::to_string)
}

/// Year of the first event among `tags` that has a `DATE`.
/// GEDCOM dates end with the year (`12 MAR 1900`, `ABT 1900`), so the last
/// token is taken as-is.
fn event_year(record: &GedcomRecord, tags: &[&str]) -> Option<String> {
    tags.iter()
        .find_map(|tag| {
            record
                .children_with(tag)
                .find_map(|event| event.child_value("DATE"))
        })
        .and_then(|date| date.split_whitespace().last())
        .map(str::to_string)
}

fn pointer(record: &GedcomRecord, tag: &str) -> Option<Xref> {
    record.child(tag).and_then(GedcomRecord::pointer).map(Xref::new)
}

fn pointers(record: &GedcomRecord, tag: &str) -> Vec<Xref> {
    record
        .children_with(tag)
        .filter_map(GedcomRecord::pointer)
        .map(Xref::new)
        .collect()
}
