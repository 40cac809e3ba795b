pub use std::collections::HashMap;
pub use std::convert::{TryFrom, TryInto};
pub use std::fmt::Display;
pub use std::path::{Path, PathBuf};
pub use std::str::FromStr;

pub use derivative::Derivative;
pub use eyre::{bail, eyre, Result, WrapErr};
pub use once_cell::sync::Lazy;
pub use regex::Regex;
pub use serde::{Deserialize, Serialize};
pub use tracing::{debug, info, trace, warn};

pub use crate::context;
pub use crate::error::ResolveError;
pub use crate::try_from_str_boilerplate;
pub use crate::vocab::*;
