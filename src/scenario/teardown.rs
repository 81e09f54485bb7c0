use crate::Result;

#[cfg(test)]
use mockall::automock;

/// Service released when a scenario ends (connections, temp data, ...).
#[cfg_attr(test, automock)]
pub trait TeardownService: Send + Sync {
    fn tear_down(&self) -> Result<()>;
}
