//! User database port interface

/// Port for mapping between login names and numeric user ids
pub trait UserDirectory: Send + Sync {
    /// Numeric id for a login name
    fn uid_of(&self, name: &str) -> Option<u32>;

    /// Login name for a numeric id
    fn name_of(&self, uid: u32) -> Option<String>;
}

impl UserDirectory for Box<dyn UserDirectory> {
    fn uid_of(&self, name: &str) -> Option<u32> {
        self.as_ref().uid_of(name)
    }

    fn name_of(&self, uid: u32) -> Option<String> {
        self.as_ref().name_of(uid)
    }
}
