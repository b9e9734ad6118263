//! Entity trait

use serde::Serialize;
use serde::de::DeserializeOwned;

/// A record type served by a REST collection.
///
/// `LABEL` is the human name used in toasts ("Order created").
///
/// # Example
///
/// ```
/// use backoffice_lib::model::Entity;
/// use serde::{Deserialize, Serialize};
///
/// #[derive(Clone, Serialize, Deserialize)]
/// struct Discount {
///     id: Option<u64>,
///     code: String,
///     percent: u8,
/// }
///
/// impl Entity for Discount {
///     const LABEL: &'static str = "Discount";
///
///     fn id(&self) -> Option<String> {
///         self.id.map(|id| id.to_string())
///     }
/// }
/// ```
pub trait Entity: Clone + Serialize + DeserializeOwned + Send + Sync + 'static {
    /// Singular display name.
    const LABEL: &'static str;

    /// Server id, `None` for records not created yet.
    fn id(&self) -> Option<String>;
}
