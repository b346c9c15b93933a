//! Applets whose language XMLs are cached for the embedded client

/// One applet of the embedded client
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Applet {
    /// Identifier known to the language API
    pub id: &'static str,
    /// Directory label shown in progress output
    pub directory: &'static str,
}

/// Every applet the batch generates language XMLs for, in processing order
pub const APPLETS: &[Applet] = &[Applet {
    id: "JSM2_MemberApplet",
    directory: "memberapplet",
}];
