//! # CLI Module
//!
//! This module provides the command-line interface layer for qciup, a tool for
//! registering a device with QIAGEN's QiaOAuth authorization server and for
//! uploading sample variant archives to QCI Interpret. It implements all
//! user-facing CLI commands and coordinates between the API client, local
//! artifact management, and user interaction components.
//!
//! ## Overview
//!
//! The CLI module serves as the primary interface between operators and the
//! qciup application's functionality. It provides commands for:
//!
//! - **Device Authorization**: OAuth 2.0 device grant with PKCE for headless machines
//! - **Sample Upload**: Manifest construction, archive assembly, and multipart upload
//!
//! ## Command Categories
//!
//! ### Device Authorization
//!
//! - [`device_code`] - Requests a device code from QiaOAuth and persists the
//!   PKCE verifier, user code, and device code for the later upload run
//!
//! ### Sample Upload
//!
//! - [`upload`] - Builds the sample manifest, assembles the upload archive,
//!   exchanges the device code for an access token, and posts the archive
//!
//! ## Architecture Design
//!
//! The CLI module follows a layered architecture approach:
//!
//! ```text
//! CLI Layer (User Interface)
//!     ↓
//! Management Layer (Manifests/Archives/Secrets)
//!     ↓
//! API Layer (QIAGEN Integration)
//!     ↓
//! Network Layer (HTTP Requests)
//! ```
//!
//! Each CLI command delegates to the management and API modules while
//! handling user interaction, progress feedback, and error presentation.
//!
//! ## Data Flow Patterns
//!
//! ### Device Authorization
//! 1. **PKCE Setup**: Generate a fresh verifier and SHA256 challenge
//! 2. **API Interaction**: Post the challenge to the device code endpoint
//! 3. **Secret Persistence**: Write verifier, user code, and device code files
//! 4. **Operator Handoff**: Show the user code and open the verification page
//!
//! ### Sample Upload
//! 1. **Manifest Construction**: Splice sample details into the XML template
//! 2. **Archive Assembly**: Extract the input ZIP, keep variant files, repack
//! 3. **Token Exchange**: Trade device code and verifier for an access token
//! 4. **Upload**: Post the archive as multipart form data
//! 5. **Cleanup**: Remove intermediary artifacts and the uploaded archive
//!
//! ## Error Handling Philosophy
//!
//! Every failure in this tool is fatal: errors are reported once, with
//! context, and the process exits non-zero. Nothing is retried and nothing
//! is recovered transparently. Error text is passed through secret masking
//! before printing so credentials and codes never reach the terminal.
//!
//! ## Progress and User Experience
//!
//! All network operations provide user feedback:
//!
//! - **Progress Indicators**: Spinners while requests are in flight
//! - **Status Messages**: Informative messages about each pipeline stage
//! - **Success Confirmation**: Clear indication when operations complete
//!
//! ## Security Considerations
//!
//! - **OAuth 2.0 Device Grant + PKCE**: Secure authorization for headless machines
//! - **Secret Files**: Verifier and device code go to files, never to the terminal
//! - **Masked Output**: Error text is scrubbed of credentials before display
//!
//! ## Usage Patterns
//!
//! ### Device Registration
//! ```bash
//! qciup device-code --client-id <ID>     # Request and persist device secrets
//! ```
//!
//! ### Sample Upload
//! ```bash
//! qciup upload --sample-name S1 --sample-path runfolder.zip \
//!     --client-id <ID> --client-secret <SECRET> \
//!     --code-verifier <VERIFIER> --device-code <CODE>
//! ```
//!
//! ## Dependencies
//!
//! This module depends on several core application components:
//! - [`crate::qiagen`] - QiaOAuth and QCI Interpret API integration
//! - [`crate::management`] - Manifest, archive, and secret file handling
//! - [`crate::types`] - Data structures and type definitions
//! - [`crate::utils`] - PKCE, credential encoding, and masking helpers

mod device_code;
mod upload;

pub use device_code::device_code;
pub use upload::upload;
