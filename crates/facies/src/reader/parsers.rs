//! Nom parsers for the leading header lines of simulation outputs

// crate modules
use crate::dimensions::Dimensions;

// external crates
use nom::character::complete::{char, digit1, space0};
use nom::combinator::map_res;
use nom::sequence::{delimited, preceded, tuple};
use nom::IResult;

/// Unsigned integer value
fn usize_value(i: &str) -> IResult<&str, usize> {
    map_res(digit1, str::parse::<usize>)(i)
}

/// Leading integer of the second header line, i.e. the number of variables
///
/// Anything after the first integer is ignored, which covers headers that
/// append the grid size to the variable count.
pub(crate) fn variable_count(i: &str) -> IResult<&str, usize> {
    delimited(space0, usize_value, space0)(i)
}

/// Grid size written as `NXxNYxNZ`, e.g. `256x256x128`
fn grid_size(i: &str) -> IResult<&str, (usize, usize, usize)> {
    tuple((
        usize_value,
        preceded(char('x'), usize_value),
        preceded(char('x'), usize_value),
    ))(i)
}

/// First grid size found anywhere in a line
///
/// Titles often carry the grid size, such as `TI (256x256x128)`, which is
/// useful to catch files simulated on a different grid.
pub(crate) fn grid_size_hint(line: &str) -> Option<Dimensions> {
    line.char_indices()
        .filter(|(_, c)| c.is_ascii_digit())
        .find_map(|(idx, _)| grid_size(&line[idx..]).ok())
        .map(|(_, (nx, ny, nz))| Dimensions::new(nx, ny, nz))
}

#[cfg(test)]
mod header_tests {
    use super::*;

    #[test]
    fn test_variable_count() {
        assert_eq!(variable_count("1"), Ok(("", 1)));
        assert_eq!(variable_count("  1  "), Ok(("", 1)));
        assert_eq!(variable_count("3 256 256 128"), Ok(("256 256 128", 3)));

        // not a count at all
        assert!(variable_count("facies").is_err());
        assert!(variable_count("").is_err());
        assert!(variable_count("-1").is_err());
    }

    #[test]
    fn test_grid_size() {
        assert_eq!(grid_size("2x3x4"), Ok(("", (2, 3, 4))));
        assert_eq!(grid_size("256x256x128)"), Ok((")", (256, 256, 128))));
        assert!(grid_size("256x256").is_err());
        assert!(grid_size("x256x256x128").is_err());
    }

    #[test]
    fn test_grid_size_hint() {
        assert_eq!(
            grid_size_hint("TI (256x256x128)"),
            Some(Dimensions::new(256, 256, 128))
        );
        assert_eq!(
            grid_size_hint("run 12 on 64x32x8 grid"),
            Some(Dimensions::new(64, 32, 8))
        );
        assert_eq!(grid_size_hint("facies realisation 12"), None);
        assert_eq!(grid_size_hint(""), None);
    }
}
