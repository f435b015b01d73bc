use crate::champions::{compact, resolve};
use crate::error::AppError;
use std::collections::HashSet;
use std::fs;
use std::path::Path;

/// The user's champion pool, one champion per line in a text file.
#[derive(Debug, Clone, Default)]
pub struct ChampionPool {
    names: HashSet<String>,
}

impl ChampionPool {
    pub fn load(path: &Path) -> Result<Self, AppError> {
        if !path.exists() {
            return Err(AppError::PoolNotFound(path.to_path_buf()));
        }
        let content = fs::read_to_string(path)?;
        Ok(Self::parse(&content))
    }

    /// Blank lines and `#` comments are ignored.
    pub fn parse(content: &str) -> Self {
        Self::from_names(
            content
                .lines()
                .map(str::trim)
                .filter(|line| !line.is_empty() && !line.starts_with('#')),
        )
    }

    /// Entries go through the alias table first, so `nunu` is stored as
    /// `Nunu & Willump` and matches the name the stats sites display.
    pub fn from_names<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        ChampionPool {
            names: names
                .into_iter()
                .map(|n| compact(&resolve(n.as_ref()).name))
                .filter(|n| !n.is_empty())
                .collect(),
        }
    }

    pub fn contains(&self, name: &str) -> bool {
        self.names.contains(&compact(name))
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_ignores_blanks_and_comments() {
        let pool = ChampionPool::parse("Yorick\n\n  # tanks\nDr. Mundo\n  sion  \n");
        assert_eq!(pool.len(), 3);
        assert!(pool.contains("yorick"));
        assert!(pool.contains("Dr. Mundo"));
        assert!(pool.contains("drmundo"));
        assert!(pool.contains("Sion"));
        assert!(!pool.contains("Garen"));
    }

    #[test]
    fn test_aliases_match_display_names() {
        let pool = ChampionPool::parse("nunu
mundo
j4
");
        assert!(pool.contains("Nunu & Willump"));
        assert!(pool.contains("Dr. Mundo"));
        assert!(pool.contains("Jarvan IV"));
        assert!(!pool.contains("Nunu"));
    }

    #[test]
    fn test_missing_file_is_reported() {
        let path = Path::new("definitely/not/here/champion_pool.txt");
        let err = ChampionPool::load(path).unwrap_err();
        assert!(matches!(err, AppError::PoolNotFound(p) if p == path));
    }
}
