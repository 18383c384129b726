//! Stateless text-artifact generators. Inputs are validated for presence and
//! range; outputs are deterministic functions of the request alone, with no
//! access to ingestion state.

pub mod dbot;
pub mod pinescript;
