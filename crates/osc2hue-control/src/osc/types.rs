//! OSC type conversion helpers

use osc2hue_core::Scalar;
use rosc::{OscMessage, OscPacket, OscType};

use crate::{error::ControlError, Result};

/// Wire name of an OSC argument type
fn osc_type_name(arg: &OscType) -> &'static str {
    match arg {
        OscType::Int(_) => "int32",
        OscType::Float(_) => "float32",
        OscType::Bool(_) => "bool",
        OscType::String(_) => "string",
        OscType::Blob(_) => "blob",
        OscType::Time(_) => "timetag",
        OscType::Long(_) => "int64",
        OscType::Double(_) => "float64",
        OscType::Char(_) => "char",
        OscType::Color(_) => "color",
        OscType::Midi(_) => "midi",
        OscType::Array(_) => "array",
        OscType::Nil => "nil",
        OscType::Inf => "inf",
    }
}

/// Convert one OSC argument.
///
/// Only 32-bit integers, 32-bit floats and booleans are accepted by the
/// command handlers; anything else is kept by name so the handler reading
/// that slot can reject it.
pub fn osc_to_scalar(arg: &OscType) -> Scalar {
    match arg {
        OscType::Int(i) => Scalar::Int(*i),
        OscType::Float(f) => Scalar::Float(*f),
        OscType::Bool(b) => Scalar::Bool(*b),
        other => Scalar::Unsupported(osc_type_name(other).to_string()),
    }
}

/// Convert a message's argument list
pub fn osc_args_to_scalars(args: &[OscType]) -> Vec<Scalar> {
    args.iter().map(osc_to_scalar).collect()
}

/// Convert a scalar back to OSC, for senders.
///
/// Unsupported values have no wire form.
pub fn scalar_to_osc(value: &Scalar) -> Option<OscType> {
    match value {
        Scalar::Int(i) => Some(OscType::Int(*i)),
        Scalar::Float(f) => Some(OscType::Float(*f)),
        Scalar::Bool(b) => Some(OscType::Bool(*b)),
        Scalar::Unsupported(_) => None,
    }
}

/// Encode a single message as a UDP payload
pub fn encode_message(address: &str, args: &[Scalar]) -> Result<Vec<u8>> {
    let args = args
        .iter()
        .map(|arg| {
            scalar_to_osc(arg).ok_or_else(|| {
                ControlError::InvalidMessage(format!("Cannot encode {} argument", arg.type_name()))
            })
        })
        .collect::<Result<Vec<_>>>()?;

    let packet = OscPacket::Message(OscMessage {
        addr: address.to_string(),
        args,
    });
    rosc::encoder::encode(&packet).map_err(|e| ControlError::OscError(format!("{:?}", e)))
}
