// construct.rs - Construct identifier decoding and arm interval derivation

use regex::Regex;

/// Decoded construct parameters extracted from a ConstructID string
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConstructParams {
    pub arm_size: i64,
    pub center: i64,
    pub arm3_start: i64,
    pub arm4_start: i64,
}

/// Parser for the fixed ConstructID encoding
///
/// A well-formed identifier carries three tagged blocks, matched anywhere in
/// the string:
/// - `CGS-<a>-<b>-<c>-<d>-<e>-<f>` - only `<f>` is used (arm half-length)
/// - `CEN-<g>` - center position
/// - `CON-<h>-<i>` - start positions of arm 3 and arm 4
///
/// Any missing or malformed block makes the whole identifier unparseable; the
/// caller must exclude such constructs from SNP resolution instead of
/// defaulting the fields.
pub struct ConstructIdParser {
    cgs: Regex,
    cen: Regex,
    con: Regex,
}

impl ConstructIdParser {
    pub fn new() -> Self {
        Self {
            cgs: Regex::new(r"CGS-(\d+)-(\d+)-(\d+)-(\d+)-(\d+)-(\d+)").unwrap(),
            cen: Regex::new(r"CEN-(\d+)").unwrap(),
            con: Regex::new(r"CON-(\d+)-(\d+)").unwrap(),
        }
    }

    /// Parse a construct identifier into its four parameters
    pub fn parse(&self, construct_id: &str) -> Result<ConstructParams, String> {
        let cgs = self
            .cgs
            .captures(construct_id)
            .ok_or_else(|| format!("Missing CGS block in construct ID '{}'", construct_id))?;
        let arm_size = parse_group(&cgs, 6, construct_id)?;

        let cen = self
            .cen
            .captures(construct_id)
            .ok_or_else(|| format!("Missing CEN block in construct ID '{}'", construct_id))?;
        let center = parse_group(&cen, 1, construct_id)?;

        let con = self
            .con
            .captures(construct_id)
            .ok_or_else(|| format!("Missing CON block in construct ID '{}'", construct_id))?;
        let arm3_start = parse_group(&con, 1, construct_id)?;
        let arm4_start = parse_group(&con, 2, construct_id)?;

        Ok(ConstructParams {
            arm_size,
            center,
            arm3_start,
            arm4_start,
        })
    }
}

impl Default for ConstructIdParser {
    fn default() -> Self {
        Self::new()
    }
}

fn parse_group(captures: &regex::Captures, index: usize, construct_id: &str) -> Result<i64, String> {
    captures
        .get(index)
        .ok_or_else(|| format!("Malformed block in construct ID '{}'", construct_id))?
        .as_str()
        .parse::<i64>()
        .map_err(|e| format!("Non-numeric field in construct ID '{}': {}", construct_id, e))
}

impl ConstructParams {
    /// Closed intervals of the four construct arms
    ///
    /// arm_size <= 0 is not validated: it yields reversed or empty intervals
    /// that simply contain no position under the inclusive membership test.
    pub fn arm_ranges(&self) -> [(i64, i64); 4] {
        [
            (self.center - self.arm_size, self.center),
            (self.center, self.center + self.arm_size),
            (self.arm3_start, self.arm3_start + self.arm_size),
            (self.arm4_start, self.arm4_start + self.arm_size),
        ]
    }
}
