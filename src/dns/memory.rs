//! In-memory resolver with canned answers

use super::DnsResolver;
use crate::types::{DnsAnswer, RecordType};
use async_trait::async_trait;
use parking_lot::{Mutex, RwLock};
use std::collections::HashMap;

/// Resolver answering from a fixed table.
///
/// Names without an entry answer `NotFound`. Every query is recorded so
/// callers can assert which names were (or were not) sent to DNS.
#[derive(Debug, Default)]
pub struct MemoryResolver {
    answers: RwLock<HashMap<(String, RecordType), DnsAnswer>>,
    queries: Mutex<Vec<(String, RecordType)>>,
}

impl MemoryResolver {
    /// Create an empty resolver
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder form of [`MemoryResolver::set_answer`]
    pub fn with_answer(self, name: &str, record_type: RecordType, answer: DnsAnswer) -> Self {
        self.set_answer(name, record_type, answer);
        self
    }

    /// Answer NS queries for `name` with the given name servers
    pub fn with_ns(self, name: &str, servers: &[&str]) -> Self {
        self.with_answer(name, RecordType::Ns, found(servers))
    }

    /// Answer TXT queries for `name` with the given records
    pub fn with_txt(self, name: &str, records: &[&str]) -> Self {
        self.with_answer(name, RecordType::Txt, found(records))
    }

    /// Replace the answer for a name and record type
    pub fn set_answer(&self, name: &str, record_type: RecordType, answer: DnsAnswer) {
        self.answers
            .write()
            .insert((normalize(name), record_type), answer);
    }

    /// Append a TXT record, keeping records already present
    pub fn add_txt(&self, name: &str, value: &str) {
        let mut answers = self.answers.write();
        let entry = answers
            .entry((normalize(name), RecordType::Txt))
            .or_insert_with(|| DnsAnswer::Found(Vec::new()));

        match entry {
            DnsAnswer::Found(records) => records.push(value.to_string()),
            other => *other = DnsAnswer::Found(vec![value.to_string()]),
        }
    }

    /// All queries received so far, in order
    pub fn queries(&self) -> Vec<(String, RecordType)> {
        self.queries.lock().clone()
    }

    /// Whether `name` was queried for any record type
    pub fn was_queried(&self, name: &str) -> bool {
        let name = normalize(name);
        self.queries.lock().iter().any(|(queried, _)| *queried == name)
    }
}

#[async_trait]
impl DnsResolver for MemoryResolver {
    async fn resolve(&self, name: &str, record_type: RecordType) -> DnsAnswer {
        let key = (normalize(name), record_type);
        self.queries.lock().push(key.clone());

        self.answers
            .read()
            .get(&key)
            .cloned()
            .unwrap_or(DnsAnswer::NotFound)
    }

    fn name(&self) -> &'static str {
        "memory"
    }
}

fn normalize(name: &str) -> String {
    name.trim_end_matches('.').to_lowercase()
}

fn found(values: &[&str]) -> DnsAnswer {
    DnsAnswer::Found(values.iter().map(|v| v.to_string()).collect())
}
