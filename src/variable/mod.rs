//! Design-token variables.
//!
//! This module provides:
//!
//! - [`VariableStore`]: collections, modes and typed variables
//! - [`VariableCollection`], [`Mode`], [`Variable`]: the stored entities
//! - [`AliasResolver`]: follows alias chains down to a concrete value
//!
//! Variables support a layered pattern where semantic tokens alias palette
//! tokens, which in turn hold concrete values, optionally per mode
//! ("Light"/"Dark").

mod collection;
mod resolve;
mod store;

pub use collection::{Mode, Variable, VariableCollection};
pub use resolve::AliasResolver;
pub use store::{VariableStore, DEFAULT_MODE_NAME};
