// THEORY:
// Command-line parsing for the `images_tx` binary. The syntax is deliberately tiny:
// `-i <file>`, `-o <file>`, any number of transformation flags (applied in the order
// given), `-parallel`, and `-h`/`-help`. The flags are single-dash words like `-gb`,
// so a small hand-written scanner is simpler than bending a general parser to fit.
//
// Parsing produces a `Parameters` value with a fully resolved transformation list; the
// pipeline never sees raw argument strings.

use crate::error::ParameterError;
use crate::transformation::TransformationKind;
use std::path::{Path, PathBuf};

/// Everything the binary needs to know from the command line.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Parameters {
    pub transformations: Vec<TransformationKind>,
    pub input_file: PathBuf,
    pub output_file: PathBuf,
    pub show_help: bool,
    /// Run each step across worker threads instead of on the calling thread.
    pub parallel: bool,
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Pending {
    Nothing,
    Input,
    Output,
}

/// Parses the arguments that follow the program name.
///
/// `-h` or `-help` stops parsing immediately and returns help-only parameters.
pub fn parse_parameters<I, S>(args: I) -> Result<Parameters, ParameterError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut params = Parameters::default();
    let mut pending = Pending::Nothing;

    for arg in args {
        let arg = arg.as_ref();

        // A flag never counts as a file name.
        if arg.starts_with('-') {
            pending = Pending::Nothing;
        }

        match pending {
            Pending::Input => {
                params.input_file = PathBuf::from(arg);
                pending = Pending::Nothing;
                continue;
            }
            Pending::Output => {
                params.output_file = PathBuf::from(arg);
                pending = Pending::Nothing;
                continue;
            }
            Pending::Nothing => {}
        }

        match arg {
            "-i" => pending = Pending::Input,
            "-o" => pending = Pending::Output,
            "-h" | "-help" => {
                return Ok(Parameters {
                    show_help: true,
                    ..Parameters::default()
                });
            }
            "-parallel" => params.parallel = true,
            flag => {
                let kind = TransformationKind::from_flag(flag)
                    .ok_or_else(|| ParameterError::UnknownFlag(flag.to_string()))?;
                params.transformations.push(kind);
            }
        }
    }

    if is_blank(&params.input_file) {
        return Err(ParameterError::MissingInput);
    }
    if is_blank(&params.output_file) {
        return Err(ParameterError::MissingOutput);
    }
    Ok(params)
}

fn is_blank(path: &Path) -> bool {
    path.to_string_lossy().trim().is_empty()
}

const USAGE: &str =
    "images_tx -i <input file> -o <output file> [transformation flags] [-parallel]\n";

const FOOTER: &str = concat!(
    "\n",
    "Multiple transformation flags can be combined.  ",
    "They are processed in the order they are listed.\n",
    "\n",
    "Other Flags:\n",
    "  -parallel  Spread each transformation across all CPU cores\n",
    "  -h, -help  Show this help\n",
    "\n",
    "Examples:\n",
    "  images_tx -i start.jpg -o result.jpg -gg -l\n",
    "  images_tx -i start.png -o result.png -p10 -g -parallel\n",
);

/// Usage text listing every transformation flag.
pub fn help_text() -> String {
    let flags: String = TransformationKind::ALL
        .iter()
        .map(|kind| format!("  {:<6} {}\n", kind.flag(), kind.description()))
        .collect();
    format!("{}\nTransformation Flags:\n{}{}", USAGE, flags, FOOTER)
}
