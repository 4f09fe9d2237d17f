/// Identity of one strand as supplied by the caller.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct StrandId {
    pub uid: i64,
    pub tag: String,
}

impl StrandId {
    pub fn new(uid: i64, tag: &str) -> Self {
        Self {
            uid,
            tag: tag.to_string(),
        }
    }
}

/// Ordered list of strand identities, one entry per strand of a complex.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IdentList {
    entries: Vec<StrandId>,
}

impl IdentList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a list whose uids are the position of each tag.
    pub fn from_tags<S: AsRef<str>>(tags: &[S]) -> Self {
        tags.iter()
            .enumerate()
            .map(|(i, tag)| StrandId::new(i as i64, tag.as_ref()))
            .collect()
    }

    pub fn push(&mut self, uid: i64, tag: &str) -> &mut Self {
        self.entries.push(StrandId::new(uid, tag));
        self
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &StrandId> {
        self.entries.iter()
    }

    pub fn tags(&self) -> impl Iterator<Item = &str> {
        self.iter().map(|id| id.tag.as_str())
    }
}

impl FromIterator<StrandId> for IdentList {
    fn from_iter<T: IntoIterator<Item = StrandId>>(iter: T) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

impl IntoIterator for IdentList {
    type Item = StrandId;
    type IntoIter = std::vec::IntoIter<StrandId>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_tags_assigns_positional_uids() {
        let ids = IdentList::from_tags(&["A", "B"]);
        let collected: Vec<_> = ids.iter().cloned().collect();
        assert_eq!(collected, vec![StrandId::new(0, "A"), StrandId::new(1, "B")]);
    }

    #[test]
    fn push_appends_in_order() {
        let mut ids = IdentList::new();
        ids.push(10, "x").push(11, "y");
        assert_eq!(ids.len(), 2);
        assert_eq!(ids.tags().collect::<Vec<_>>(), vec!["x", "y"]);
    }
}
