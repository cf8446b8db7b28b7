//! Interactive overwrite confirmation.

use std::io::{self, BufRead, Write};
use std::path::Path;

/// Ask whether `path` may be overwritten. Only `y`/`yes` (any case) accept.
///
/// End of input counts as a decline.
pub fn confirm_overwrite<R: BufRead, W: Write>(
    path: &Path,
    mut input: R,
    mut output: W,
) -> io::Result<bool> {
    writeln!(
        output,
        "The file {} already exists. Do you want to overwrite it? y/n",
        path.display()
    )?;
    output.flush()?;
    let mut answer = String::new();
    input.read_line(&mut answer)?;
    let answer = answer.trim().to_lowercase();
    Ok(matches!(answer.as_str(), "y" | "yes"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ask(answer: &str) -> (bool, String) {
        let mut shown = Vec::new();
        let accepted =
            confirm_overwrite(Path::new("out.csv"), answer.as_bytes(), &mut shown).unwrap();
        (accepted, String::from_utf8(shown).unwrap())
    }

    #[test]
    fn accepts_yes() {
        assert!(ask("y\n").0);
        assert!(ask(" YES \n").0);
    }

    #[test]
    fn declines_anything_else() {
        assert!(!ask("n\n").0);
        assert!(!ask("sure\n").0);
        assert!(!ask("").0);
    }

    #[test]
    fn shows_the_path() {
        let (_, shown) = ask("n\n");
        assert_eq!(
            shown,
            "The file out.csv already exists. Do you want to overwrite it? y/n\n"
        );
    }
}
