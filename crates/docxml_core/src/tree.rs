use crate::{DocRecord, MemberKind};

/// Output aggregate: one assembly and its members in emission order.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DocTree {
    assembly_name: String,
    members: Vec<DocRecord>,
}

/// Per-kind member totals, used for the end-of-run summary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct KindCounts {
    pub types: usize,
    pub methods: usize,
    pub constructors: usize,
    pub properties: usize,
    pub unknown: usize,
}

impl DocTree {
    pub fn new(assembly_name: impl Into<String>) -> Self {
        Self {
            assembly_name: assembly_name.into(),
            members: Vec::new(),
        }
    }

    /// Wraps `records` in received order. Duplicate names are kept as-is.
    pub fn build(
        assembly_name: impl Into<String>,
        records: impl IntoIterator<Item = DocRecord>,
    ) -> Self {
        let mut tree = Self::new(assembly_name);
        tree.extend(records);
        tree
    }

    pub fn push(&mut self, record: DocRecord) {
        self.members.push(record);
    }

    pub fn extend(&mut self, records: impl IntoIterator<Item = DocRecord>) {
        self.members.extend(records);
    }

    pub fn assembly_name(&self) -> &str {
        &self.assembly_name
    }

    pub fn members(&self) -> &[DocRecord] {
        &self.members
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn kind_counts(&self) -> KindCounts {
        let mut counts = KindCounts::default();
        for record in &self.members {
            match record.kind() {
                Some(MemberKind::Type) => counts.types += 1,
                Some(MemberKind::Method) => counts.methods += 1,
                Some(MemberKind::Constructor) => counts.constructors += 1,
                Some(MemberKind::Property) => counts.properties += 1,
                None => counts.unknown += 1,
            }
        }
        counts
    }
}
