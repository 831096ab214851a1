/// Produces comment ids. Every id returned must be unique for the lifetime of
/// the process.
pub trait IdSource: Send {
    fn new_id(&self) -> String;
}

#[derive(Debug, Default, Clone, Copy)]
pub struct UuidSource;

impl IdSource for UuidSource {
    fn new_id(&self) -> String {
        uuid::Uuid::new_v4().hyphenated().to_string()
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn uuid_source_does_not_repeat() {
        let ids: HashSet<String> = (0..1000).map(|_| UuidSource.new_id()).collect();
        assert_eq!(ids.len(), 1000);
    }

    #[test]
    fn uuid_source_is_hyphenated_v4() {
        let id = UuidSource.new_id();
        let parsed = uuid::Uuid::parse_str(&id).unwrap();
        assert_eq!(parsed.get_version_num(), 4);
        assert_eq!(id.len(), 36);
    }
}
