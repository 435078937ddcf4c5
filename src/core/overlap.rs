// overlap.rs - SNP membership against construct arm intervals

use crate::core::construct::{ConstructIdParser, ConstructParams};
use crate::data::snp::SnpSet;

/// Test whether a position falls inside a closed interval, inclusive on both
/// ends. Reversed intervals (start > end) contain nothing.
pub fn arm_contains(start: i64, end: i64, position: i64) -> bool {
    start <= position && position <= end
}

/// Collect the SNP positions contained in any of the construct's arms
///
/// Each SNP is recorded on its first matching arm; the caller only needs the
/// set of matches, not which arm matched. Linear scan over arms x snps is
/// adequate at the expected SNP-set sizes (low hundreds).
pub fn snps_in_arms(params: &ConstructParams, snps: &SnpSet) -> Vec<i64> {
    let arm_ranges = params.arm_ranges();
    let mut contained = Vec::new();

    for &snp in snps.iter() {
        for &(start, end) in arm_ranges.iter() {
            if arm_contains(start, end, snp) {
                contained.push(snp);
                break;
            }
        }
    }

    contained
}

/// Reduce the overlapping SNPs of one construct to its representative
///
/// Multiple overlapping SNPs collapse to the minimum position so each
/// construct carries at most one label downstream.
pub fn representative_snp(overlapping: &[i64]) -> Option<i64> {
    overlapping.iter().copied().min()
}

/// Resolve the SNPs contained in a construct directly from its identifier
///
/// Returns a decode error for unparseable identifiers; the caller counts those
/// separately from constructs that simply contain no SNP.
pub fn resolve_construct_snps(
    parser: &ConstructIdParser,
    construct_id: &str,
    snps: &SnpSet,
) -> Result<Vec<i64>, String> {
    let params = parser.parse(construct_id)?;
    Ok(snps_in_arms(&params, snps))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params() -> ConstructParams {
        ConstructParams {
            arm_size: 10,
            center: 100,
            arm3_start: 200,
            arm4_start: 300,
        }
    }

    #[test]
    fn test_membership_is_inclusive_on_both_ends() {
        // arm1 = [90, 100]
        assert!(arm_contains(90, 100, 90));
        assert!(arm_contains(90, 100, 100));
        assert!(arm_contains(90, 100, 95));
        assert!(!arm_contains(90, 100, 89));
        assert!(!arm_contains(90, 100, 101));
    }

    #[test]
    fn test_snps_in_arms_boundaries() {
        let snps = SnpSet::from_positions([90, 110, 200, 310, 89, 111, 199, 311]);
        let mut contained = snps_in_arms(&params(), &snps);
        contained.sort();

        // 90 and 110 sit on the outer edges of arms 1/2; 200 and 310 on the
        // edges of arms 3/4; the off-by-one neighbours are outside
        assert_eq!(contained, vec![90, 110, 200, 310]);
    }

    #[test]
    fn test_representative_snp_is_minimum() {
        assert_eq!(representative_snp(&[120, 45, 300]), Some(45));
        assert_eq!(representative_snp(&[300, 120, 45]), Some(45));
        assert_eq!(representative_snp(&[45]), Some(45));
        assert_eq!(representative_snp(&[]), None);
    }

    #[test]
    fn test_degenerate_arm_size_contains_nothing_reversed() {
        let reversed = ConstructParams {
            arm_size: -5,
            center: 100,
            arm3_start: 200,
            arm4_start: 300,
        };
        let snps = SnpSet::from_positions([95, 100, 105, 200, 300]);
        let contained = snps_in_arms(&reversed, &snps);
        // All four intervals are reversed, so nothing matches
        assert!(contained.is_empty());
    }

    #[test]
    fn test_resolve_decode_error() {
        let parser = ConstructIdParser::new();
        let snps = SnpSet::from_positions([100]);
        assert!(resolve_construct_snps(&parser, "garbage", &snps).is_err());
    }

    #[test]
    fn test_resolve_well_formed_id() {
        let parser = ConstructIdParser::new();
        let snps = SnpSet::from_positions([495, 725, 9999]);
        let contained =
            resolve_construct_snps(&parser, "CGS-1-2-3-4-5-30 CEN-500 CON-700-900", &snps)
                .unwrap();
        assert_eq!(contained, vec![495, 725]);
    }
}
