//! Static HTTP status catalog.
//!
//! The catalog is a fixed, sorted table compiled into the binary. Lookup by
//! code is total for the listed codes and fails explicitly otherwise.
//!
//! ```
//! use error_sdk::http::{HttpStatus, StatusClass};
//!
//! let status = HttpStatus::from_code(404).unwrap();
//! assert_eq!(status.reason_phrase(), "Not Found");
//! assert_eq!(status.class(), StatusClass::ClientError);
//! assert!(HttpStatus::from_code(299).is_err());
//! ```

pub mod status;

pub use status::{HttpStatus, StatusClass};
