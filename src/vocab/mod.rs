mod package_name;

// All this stuff is also re-exported from crate::prelude::*

pub use self::package_name::PackageName;
