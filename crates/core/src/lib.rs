#![forbid(unsafe_code)]

pub mod lock;

pub mod ids {
    const MAX_IDENTIFIER_LEN: usize = 256;

    #[derive(Clone, Debug, PartialEq, Eq)]
    pub enum IdError {
        Empty,
        TooLong,
        InvalidChar { ch: char, index: usize },
    }

    /// Trims surrounding whitespace and validates the result. Exercise ids,
    /// version labels, owners and request ids all share this discipline.
    pub fn canonical_identifier(value: &str) -> Result<String, IdError> {
        let value = value.trim();
        if value.is_empty() {
            return Err(IdError::Empty);
        }
        if value.len() > MAX_IDENTIFIER_LEN {
            return Err(IdError::TooLong);
        }
        for (index, ch) in value.chars().enumerate() {
            if ch.is_control() {
                return Err(IdError::InvalidChar { ch, index });
            }
        }
        Ok(value.to_string())
    }
}

pub mod model {
    /// Named mutable pointer selecting which version of an exercise is
    /// current for that purpose.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub enum Branch {
        Testing,
        Published,
    }

    impl Branch {
        pub fn as_str(self) -> &'static str {
            match self {
                Branch::Testing => "testing",
                Branch::Published => "published",
            }
        }

        pub fn parse(value: &str) -> Option<Branch> {
            match value.trim() {
                "testing" => Some(Branch::Testing),
                "published" => Some(Branch::Published),
                _ => None,
            }
        }
    }

    /// Either a branch tag resolved at operation time or a literal version
    /// label. The two are mutually exclusive by construction.
    #[derive(Clone, Debug, PartialEq, Eq)]
    pub enum VersionRef {
        Branch(Branch),
        Version(String),
    }

    #[derive(Clone, Copy, Debug, PartialEq, Eq)]
    pub enum VersionRefError {
        Conflicting,
    }

    impl VersionRef {
        /// Builds a reference from transport-level optionals. A request may
        /// carry a literal version or a branch tag, never both.
        pub fn from_options(
            version: Option<String>,
            branch: Option<Branch>,
            default: Branch,
        ) -> Result<VersionRef, VersionRefError> {
            match (version, branch) {
                (Some(_), Some(_)) => Err(VersionRefError::Conflicting),
                (Some(version), None) => Ok(VersionRef::Version(version)),
                (None, Some(branch)) => Ok(VersionRef::Branch(branch)),
                (None, None) => Ok(VersionRef::Branch(default)),
            }
        }
    }

    /// Branch set a retract applies to. `testing` alone is not a valid
    /// scope; clearing testing happens only together with published.
    #[derive(Clone, Copy, Debug, PartialEq, Eq)]
    pub enum RetractScope {
        Published,
        Both,
    }

    impl RetractScope {
        pub fn branches(self) -> &'static [Branch] {
            match self {
                RetractScope::Published => &[Branch::Published],
                RetractScope::Both => &[Branch::Testing, Branch::Published],
            }
        }

        pub fn parse(value: &str) -> Option<RetractScope> {
            match value.trim() {
                "published" => Some(RetractScope::Published),
                "both" => Some(RetractScope::Both),
                _ => None,
            }
        }
    }
}
