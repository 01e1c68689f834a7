use std::fmt;

/// Kind of documented member, encoded as the one-letter prefix of its name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum MemberKind {
    Type,
    Method,
    Constructor,
    Property,
}

impl MemberKind {
    pub const ALL: [MemberKind; 4] = [
        MemberKind::Type,
        MemberKind::Method,
        MemberKind::Constructor,
        MemberKind::Property,
    ];

    pub fn prefix(self) -> char {
        match self {
            MemberKind::Type => 'T',
            MemberKind::Method => 'M',
            MemberKind::Constructor => 'C',
            MemberKind::Property => 'P',
        }
    }

    /// Builds `<prefix>:<namespace><path>`.
    ///
    /// `namespace` is used verbatim, so it normally ends with a `.`.
    pub fn qualify(self, namespace: &str, path: &str) -> String {
        format!("{}:{namespace}{path}", self.prefix())
    }

    /// Recovers the kind from a qualified member name.
    pub fn of_name(name: &str) -> Option<MemberKind> {
        let mut chars = name.chars();
        let prefix = chars.next()?;
        if chars.next() != Some(':') {
            return None;
        }
        Self::ALL.into_iter().find(|kind| kind.prefix() == prefix)
    }
}

impl fmt::Display for MemberKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MemberKind::Type => write!(f, "type"),
            MemberKind::Method => write!(f, "method"),
            MemberKind::Constructor => write!(f, "constructor"),
            MemberKind::Property => write!(f, "property"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParamEntry {
    pub name: String,
    pub description: Option<String>,
}

impl ParamEntry {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
        }
    }

    pub fn described(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: Some(description.into()),
        }
    }
}

/// One member's documentation as written to the output file.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DocRecord {
    pub name: String,
    pub summary: String,
    pub remarks: String,
    pub params: Vec<ParamEntry>,
}

impl DocRecord {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn with_summary(mut self, summary: impl Into<String>) -> Self {
        self.summary = summary.into();
        self
    }

    pub fn with_params(mut self, params: Vec<ParamEntry>) -> Self {
        self.params = params;
        self
    }

    pub fn kind(&self) -> Option<MemberKind> {
        MemberKind::of_name(&self.name)
    }
}
