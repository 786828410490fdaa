//! Art-Net opcodes

use std::borrow::Cow;
use std::fmt;

/// Well-known Art-Net opcodes.
///
/// Only [`OpCode::Dmx`] is decoded; the rest are named so that discarded
/// packets show up readably in logs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u16)]
pub enum OpCode {
    /// Discovery poll
    Poll = 0x2000,
    /// Reply to a poll
    PollReply = 0x2100,
    /// Diagnostics and logging
    DiagData = 0x2300,
    /// Text command
    Command = 0x2400,
    /// DMX512 data
    Dmx = 0x5000,
    /// Non-zero start code data
    Nzs = 0x5100,
    /// Synchronise output of previously received DMX
    Sync = 0x5200,
    /// Remote node programming
    Address = 0x6000,
    /// Input enable/disable
    Input = 0x7000,
    /// RDM table of devices
    TodRequest = 0x8000,
    /// RDM table of devices data
    TodData = 0x8100,
    /// RDM control
    TodControl = 0x8200,
    /// RDM message
    Rdm = 0x8300,
    /// Compressed RDM sub-device
    RdmSub = 0x8400,
    /// Timecode
    TimeCode = 0x9700,
    /// Trigger macro
    Trigger = 0x9900,
}

impl OpCode {
    /// Convert from the little-endian wire value
    #[must_use]
    pub fn from_u16(value: u16) -> Option<Self> {
        match value {
            0x2000 => Some(Self::Poll),
            0x2100 => Some(Self::PollReply),
            0x2300 => Some(Self::DiagData),
            0x2400 => Some(Self::Command),
            0x5000 => Some(Self::Dmx),
            0x5100 => Some(Self::Nzs),
            0x5200 => Some(Self::Sync),
            0x6000 => Some(Self::Address),
            0x7000 => Some(Self::Input),
            0x8000 => Some(Self::TodRequest),
            0x8100 => Some(Self::TodData),
            0x8200 => Some(Self::TodControl),
            0x8300 => Some(Self::Rdm),
            0x8400 => Some(Self::RdmSub),
            0x9700 => Some(Self::TimeCode),
            0x9900 => Some(Self::Trigger),
            _ => None,
        }
    }

    /// Convert to the wire value
    #[must_use]
    pub const fn as_u16(self) -> u16 {
        self as u16
    }

    /// Name as written in the Art-Net tables, e.g. `OpPoll`
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Poll => "OpPoll",
            Self::PollReply => "OpPollReply",
            Self::DiagData => "OpDiagData",
            Self::Command => "OpCommand",
            Self::Dmx => "OpDmx",
            Self::Nzs => "OpNzs",
            Self::Sync => "OpSync",
            Self::Address => "OpAddress",
            Self::Input => "OpInput",
            Self::TodRequest => "OpTodRequest",
            Self::TodData => "OpTodData",
            Self::TodControl => "OpTodControl",
            Self::Rdm => "OpRdm",
            Self::RdmSub => "OpRdmSub",
            Self::TimeCode => "OpTimeCode",
            Self::Trigger => "OpTrigger",
        }
    }
}

impl fmt::Display for OpCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Log label for a raw wire opcode: its name when known, hex otherwise.
#[must_use]
pub fn opcode_name(raw: u16) -> Cow<'static, str> {
    match OpCode::from_u16(raw) {
        Some(op) => Cow::Borrowed(op.name()),
        None => Cow::Owned(format!("{raw:#06x}")),
    }
}
