use crate::util::{CliResult, read_input};
use clap::Args;
use std::fmt::Write;
use std::path::PathBuf;
use xbfload_core::{XbfDocument, disassemble};

#[derive(Args, Debug, Clone)]
pub struct DisasmArgs {
    #[arg(value_name = "FILE")]
    pub file: PathBuf,
    /// Only print this stream.
    #[arg(long = "stream", value_name = "N")]
    pub stream: Option<usize>,
}

pub fn run(args: &DisasmArgs) -> CliResult<String> {
    let input = read_input(&args.file)?;
    render_streams(&input.document, args.stream)
}

pub(crate) fn render_streams(document: &XbfDocument, only: Option<usize>) -> CliResult<String> {
    let indices: Vec<usize> = match only {
        Some(index) if document.stream(index).is_none() => {
            return Err(format!("document has no stream {index} ({} streams)", document.streams.len()).into());
        }
        Some(index) => vec![index],
        None => (0..document.streams.len()).collect(),
    };

    let mut output = String::new();
    for index in indices {
        let Some(stream) = document.stream(index) else { continue };
        let _ = writeln!(&mut output, "stream {index} ({} nodes)", stream.len());
        let _ = writeln!(&mut output, "{}", disassemble(stream));
    }
    Ok(output.trim_end().to_owned())
}
