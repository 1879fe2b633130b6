// Library root
// -----------
// This crate exposes a small library surface for the CLI. The binary
// (`main.rs`) uses these modules to implement the interactive CLI.
//
// Module responsibilities:
// - `api`: Encapsulates the RESTCONF interactions with the IOS-XE device
//   (interfaces, hostname, IP domain, native configuration) plus the
//   device configuration read at startup.
// - `ui`: Implements the terminal menu and per-operation flows and
//   delegates requests to `api`.
//
// Keeping this separation makes it easier to test the request payloads
// and table rendering without a device on the other end.
pub mod api;
pub mod ui;
