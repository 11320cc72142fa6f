use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ObjectType {
    Blob,
    Tree,
    Commit,
}

/// Leading keyword of serialized content mapped to the object type it implies.
///
/// Tree lines start with either `blob` or `tree`, so both keywords mean tree.
const LEADING_KEYWORDS: phf::Map<&'static str, ObjectType> = phf::phf_map! {
    "commit" => ObjectType::Commit,
    "tree" => ObjectType::Tree,
    "blob" => ObjectType::Tree,
};

impl ObjectType {
    pub fn as_str(&self) -> &str {
        match self {
            ObjectType::Blob => "blob",
            ObjectType::Tree => "tree",
            ObjectType::Commit => "commit",
        }
    }

    /// Classify content by its first space-delimited token.
    ///
    /// Anything that is not a recognised commit or tree header is a blob. Only
    /// call this on content already known to be a commit or a tree: a blob whose
    /// text begins with `tree ` or `commit ` is indistinguishable from those.
    pub fn sniff(content: &[u8]) -> ObjectType {
        let first_token = content.split(|byte| *byte == b' ').next().unwrap_or_default();

        std::str::from_utf8(first_token)
            .ok()
            .and_then(|token| LEADING_KEYWORDS.get(token))
            .copied()
            .unwrap_or(ObjectType::Blob)
    }
}

impl TryFrom<&str> for ObjectType {
    type Error = anyhow::Error;

    fn try_from(value: &str) -> anyhow::Result<Self> {
        match value {
            "blob" => Ok(ObjectType::Blob),
            "tree" => Ok(ObjectType::Tree),
            "commit" => Ok(ObjectType::Commit),
            _ => Err(anyhow::anyhow!("Invalid object type")),
        }
    }
}

impl fmt::Display for ObjectType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
