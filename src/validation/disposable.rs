use std::collections::HashSet;
use std::path::Path;

/// Static set of domains known to hand out throwaway addresses.
///
/// Built once at startup from the `mailchecker` list, optionally extended
/// with an operator-supplied file, then shared read-only.
#[derive(Debug, Clone, Default)]
pub struct DisposableBlocklist {
    domains: HashSet<String>,
}

impl DisposableBlocklist {
    /// The disposable providers known to `mailchecker`.
    pub fn builtin() -> Self {
        Self {
            domains: mailchecker::blacklist()
                .into_iter()
                .map(str::to_lowercase)
                .collect(),
        }
    }

    /// Parses one domain per line; blank lines and `#` comments are skipped.
    pub fn from_list(text: &str) -> Self {
        let mut blocklist = Self::default();
        blocklist.extend_from_list(text);
        blocklist
    }

    pub fn extend_from_list(&mut self, text: &str) {
        self.domains.extend(
            text.lines()
                .map(str::trim)
                .filter(|line| !line.is_empty() && !line.starts_with('#'))
                .map(str::to_lowercase),
        );
    }

    /// Adds the entries of a list file to the set.
    pub fn extend_from_file(&mut self, path: &Path) -> std::io::Result<usize> {
        let before = self.domains.len();
        let text = std::fs::read_to_string(path)?;
        self.extend_from_list(&text);
        Ok(self.domains.len() - before)
    }

    /// Exact, case-insensitive membership test on the domain part.
    pub fn is_disposable(&self, domain: &str) -> bool {
        self.domains.contains(&domain.to_lowercase())
    }

    pub fn len(&self) -> usize {
        self.domains.len()
    }

    pub fn is_empty(&self) -> bool {
        self.domains.is_empty()
    }
}
