use error_sdk::taxonomy::{find_cause, has_cause, is_caused_by, root_cause, CauseChain};
use error_sdk::Exception;
use std::error::Error;
use std::fmt;
use std::io;

#[derive(Debug)]
struct Looping;

impl fmt::Display for Looping {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("looping")
    }
}

impl Error for Looping {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        Some(&LOOPING)
    }
}

static LOOPING: Looping = Looping;

fn layered() -> Exception {
    let io = io::Error::new(io::ErrorKind::ConnectionReset, "reset by peer");
    Exception::database("query failed")
        .caused_by(Exception::io_operation("socket read failed").caused_by(io))
}

#[test]
fn chain_starts_with_the_error_itself() {
    let err = layered();
    let messages: Vec<String> = CauseChain::new(&err).map(|e| e.to_string()).collect();
    assert_eq!(messages, ["query failed", "socket read failed", "reset by peer"]);
    assert_eq!(CauseChain::causes_of(&err).count(), 2);
}

#[test]
fn root_cause_is_the_deepest_error() {
    let err = layered();
    assert_eq!(root_cause(&err).to_string(), "reset by peer");

    let lone = Exception::checked("alone");
    assert_eq!(root_cause(&lone).to_string(), "alone");
    assert!(!has_cause(&lone));
}

#[test]
fn typed_lookup_walks_the_chain() {
    let err = layered();
    let io = find_cause::<io::Error>(&err).unwrap();
    assert_eq!(io.kind(), io::ErrorKind::ConnectionReset);
    assert!(is_caused_by::<io::Error>(&err));
    assert!(!is_caused_by::<fmt::Error>(&err));
}

#[test]
fn self_referencing_source_terminates() {
    let visited = CauseChain::new(&LOOPING).count();
    assert_eq!(visited, 1);
    assert_eq!(root_cause(&LOOPING).to_string(), "looping");
}
