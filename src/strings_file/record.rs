use std::cmp::Ordering;
use std::fmt;

/// One `"key" = "value";` entry of a `.strings` file.
///
/// `value` is already unescaped, `message` is the comment that belongs to the
/// entry with surrounding spaces trimmed.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Record {
    pub key: String,
    pub value: String,
    pub message: Option<String>,
}

impl Record {
    pub fn new<K, V>(key: K, value: V, message: Option<String>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            key: key.into(),
            value: value.into(),
            message,
        }
    }
}

impl fmt::Display for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} = {}", self.key, self.value)?;
        if let Some(message) = &self.message {
            write!(f, "/* {message} */")?;
        }
        Ok(())
    }
}

impl PartialOrd for Record {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

// by key first, so sorting groups a file alphabetically
impl Ord for Record {
    fn cmp(&self, other: &Self) -> Ordering {
        self.key
            .cmp(&other.key)
            .then_with(|| self.value.cmp(&other.value))
            .then_with(|| self.message.cmp(&other.message))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_without_message() {
        let record = Record::new("greeting", "Hello", None);
        assert_eq!(record.to_string(), "greeting = Hello");
    }

    #[test]
    fn test_display_with_message() {
        let record = Record::new("greeting", "Hello", Some("shown on launch".into()));
        assert_eq!(record.to_string(), "greeting = Hello/* shown on launch */");
    }

    #[test]
    fn test_sorting_orders_by_key() {
        let mut records = vec![
            Record::new("b", "1", None),
            Record::new("a", "2", None),
            Record::new("c", "0", None),
        ];
        records.sort();

        let keys: Vec<&str> = records.iter().map(|r| r.key.as_str()).collect();
        assert_eq!(keys, ["a", "b", "c"]);
    }
}
