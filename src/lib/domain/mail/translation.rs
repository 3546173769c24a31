//! Translation lookup seam

#[cfg(test)]
use mockall::mock;

/// Looks up localized strings by key.
pub trait Translator: Send + Sync + 'static {
    /// Translates a key, returning the key unchanged when no translation
    /// exists for it.
    fn translate(&self, key: &str) -> String;
}

#[cfg(test)]
mock! {
    pub Translator {}

    impl Translator for Translator {
        fn translate(&self, key: &str) -> String;
    }
}
