// THEORY:
// `TransformationKind` is the public vocabulary of the filter: the thirteen names a
// user can ask for, each with a command-line flag and a canonical name. It is a closed
// enum, and `operator` is the single dispatch table that maps each name to the work
// it stands for: either a per-pixel `ChannelOp` or a pixelation block size.
//
// Parsing lives here too, so the command line and any other caller resolve names the
// same way. Unknown names surface as `UnknownTransformation`.

use crate::core_modules::block_op::pixelate;
use crate::core_modules::channel_ops::ChannelOp;
use crate::core_modules::pixel_buffer::PixelBuffer;
use crate::core_modules::single_op::apply_channel_op;
use crate::error::{FilterError, PipelineError};
use std::fmt;
use std::str::FromStr;

/// One named transformation a user can request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TransformationKind {
    Grayscale,
    GrayscaleKeepBlue,
    GrayscaleKeepGreen,
    GrayscaleKeepRed,
    ShiftLeft,
    ShiftRight,
    SwapGreenBlue,
    SwapRedBlue,
    SwapRedGreen,
    Pixelate3,
    Pixelate10,
    Pixelate20,
    Pixelate50,
}

/// What a transformation does once resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operator {
    /// Apply a channel remap to every pixel.
    Single(ChannelOp),
    /// Pixelate with square tiles of this edge length.
    Block(usize),
}

impl Operator {
    /// Runs the operator over `buffer`, producing a new buffer of the same size.
    pub fn apply(self, buffer: &PixelBuffer) -> Result<PixelBuffer, FilterError> {
        match self {
            Operator::Single(op) => Ok(apply_channel_op(buffer, op)),
            Operator::Block(size) => pixelate(buffer, size),
        }
    }
}

impl TransformationKind {
    /// Every transformation, in the order the help text lists them.
    pub const ALL: [TransformationKind; 13] = [
        TransformationKind::Grayscale,
        TransformationKind::GrayscaleKeepBlue,
        TransformationKind::GrayscaleKeepGreen,
        TransformationKind::GrayscaleKeepRed,
        TransformationKind::ShiftLeft,
        TransformationKind::Pixelate3,
        TransformationKind::Pixelate10,
        TransformationKind::Pixelate20,
        TransformationKind::Pixelate50,
        TransformationKind::ShiftRight,
        TransformationKind::SwapGreenBlue,
        TransformationKind::SwapRedBlue,
        TransformationKind::SwapRedGreen,
    ];

    /// The dispatch table.
    pub fn operator(self) -> Operator {
        match self {
            TransformationKind::Grayscale => Operator::Single(ChannelOp::Grayscale),
            TransformationKind::GrayscaleKeepBlue => Operator::Single(ChannelOp::GrayscaleKeepBlue),
            TransformationKind::GrayscaleKeepGreen => {
                Operator::Single(ChannelOp::GrayscaleKeepGreen)
            }
            TransformationKind::GrayscaleKeepRed => Operator::Single(ChannelOp::GrayscaleKeepRed),
            TransformationKind::ShiftLeft => Operator::Single(ChannelOp::ShiftLeft),
            TransformationKind::ShiftRight => Operator::Single(ChannelOp::ShiftRight),
            TransformationKind::SwapGreenBlue => Operator::Single(ChannelOp::SwapGreenBlue),
            TransformationKind::SwapRedBlue => Operator::Single(ChannelOp::SwapRedBlue),
            TransformationKind::SwapRedGreen => Operator::Single(ChannelOp::SwapRedGreen),
            TransformationKind::Pixelate3 => Operator::Block(3),
            TransformationKind::Pixelate10 => Operator::Block(10),
            TransformationKind::Pixelate20 => Operator::Block(20),
            TransformationKind::Pixelate50 => Operator::Block(50),
        }
    }

    /// Command-line flag, e.g. `-gb`.
    pub fn flag(self) -> &'static str {
        match self {
            TransformationKind::Grayscale => "-g",
            TransformationKind::GrayscaleKeepBlue => "-gb",
            TransformationKind::GrayscaleKeepGreen => "-gg",
            TransformationKind::GrayscaleKeepRed => "-gr",
            TransformationKind::ShiftLeft => "-l",
            TransformationKind::ShiftRight => "-r",
            TransformationKind::SwapGreenBlue => "-sgb",
            TransformationKind::SwapRedBlue => "-srb",
            TransformationKind::SwapRedGreen => "-srg",
            TransformationKind::Pixelate3 => "-p3",
            TransformationKind::Pixelate10 => "-p10",
            TransformationKind::Pixelate20 => "-p20",
            TransformationKind::Pixelate50 => "-p50",
        }
    }

    /// Canonical lowercase name, e.g. `grayscale-keep-blue`.
    pub fn name(self) -> &'static str {
        match self {
            TransformationKind::Grayscale => "grayscale",
            TransformationKind::GrayscaleKeepBlue => "grayscale-keep-blue",
            TransformationKind::GrayscaleKeepGreen => "grayscale-keep-green",
            TransformationKind::GrayscaleKeepRed => "grayscale-keep-red",
            TransformationKind::ShiftLeft => "shift-left",
            TransformationKind::ShiftRight => "shift-right",
            TransformationKind::SwapGreenBlue => "swap-green-blue",
            TransformationKind::SwapRedBlue => "swap-red-blue",
            TransformationKind::SwapRedGreen => "swap-red-green",
            TransformationKind::Pixelate3 => "pixelate3",
            TransformationKind::Pixelate10 => "pixelate10",
            TransformationKind::Pixelate20 => "pixelate20",
            TransformationKind::Pixelate50 => "pixelate50",
        }
    }

    /// One-line description for the help text.
    pub fn description(self) -> &'static str {
        match self {
            TransformationKind::Grayscale => "Convert image to grayscale",
            TransformationKind::GrayscaleKeepBlue => {
                "Convert image to grayscale, maintain blue value"
            }
            TransformationKind::GrayscaleKeepGreen => {
                "Convert image to grayscale, maintain green value"
            }
            TransformationKind::GrayscaleKeepRed => {
                "Convert image to grayscale, maintain red value"
            }
            TransformationKind::ShiftLeft => {
                "Shift Left (Red -> Blue, Green -> Red, Blue -> Green)"
            }
            TransformationKind::ShiftRight => {
                "Shift Right (Red -> Green, Green -> Blue, Blue -> Red)"
            }
            TransformationKind::SwapGreenBlue => "Swap green and blue values",
            TransformationKind::SwapRedBlue => "Swap red and blue values",
            TransformationKind::SwapRedGreen => "Swap red and green values",
            TransformationKind::Pixelate3 => "Pixelate the image in 3x3 blocks",
            TransformationKind::Pixelate10 => "Pixelate the image in 10x10 blocks",
            TransformationKind::Pixelate20 => "Pixelate the image in 20x20 blocks",
            TransformationKind::Pixelate50 => "Pixelate the image in 50x50 blocks",
        }
    }

    /// Looks a transformation up by flag only.
    pub fn from_flag(flag: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.flag() == flag)
    }
}

impl fmt::Display for TransformationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for TransformationKind {
    type Err = PipelineError;

    /// Accepts either a flag (`-p10`) or a canonical name (`pixelate10`), ignoring
    /// surrounding whitespace and case.
    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let wanted = value.trim().to_lowercase();
        Self::ALL
            .into_iter()
            .find(|kind| kind.flag() == wanted || kind.name() == wanted)
            .ok_or_else(|| PipelineError::UnknownTransformation(value.to_string()))
    }
}
