use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// One row of the company index. Field order and names match the
/// listing table header `company,id,city,dep,sec`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompanyRecord {
    #[serde(rename = "company")]
    pub name: String,
    pub id: String,
    pub city: String,
    #[serde(rename = "dep")]
    pub departments: String,
    #[serde(rename = "sec")]
    pub sector: String,
}

impl CompanyRecord {
    /// Overwrite fields with the non-empty values of `other`.
    fn absorb(&mut self, other: CompanyRecord) {
        let pairs = [
            (&mut self.name, other.name),
            (&mut self.city, other.city),
            (&mut self.departments, other.departments),
            (&mut self.sector, other.sector),
        ];
        for (slot, value) in pairs {
            if !value.is_empty() {
                *slot = value;
            }
        }
    }
}

/// Free-text values captured from a detail page, in page order.
pub type CompanyDetail = Vec<String>;

/// Companies keyed by id, in first-seen order.
#[derive(Debug, Default, Serialize)]
#[serde(transparent)]
pub struct CompanyDirectory {
    companies: IndexMap<String, CompanyRecord>,
}

impl CompanyDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or merge `record`. Returns `true` the first time its id is seen.
    pub fn merge(&mut self, record: CompanyRecord) -> bool {
        match self.companies.get_mut(&record.id) {
            Some(existing) => {
                existing.absorb(record);
                false
            }
            None => {
                self.companies.insert(record.id.clone(), record);
                true
            }
        }
    }

    pub fn contains(&self, id: &str) -> bool {
        self.companies.contains_key(id)
    }

    pub fn get(&self, id: &str) -> Option<&CompanyRecord> {
        self.companies.get(id)
    }

    pub fn len(&self) -> usize {
        self.companies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.companies.is_empty()
    }

    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.companies.keys().map(String::as_str)
    }
}
