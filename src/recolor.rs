//! Exact-match color substitution over RGBA rasters
//!
//! Recoloring swaps the colors of one uniform for another, garment group by
//! garment group. Colors are paired positionally: the i-th slot of the old
//! uniform's garment maps to the i-th slot of the new uniform's garment.
//! Only exact RGB matches are replaced, and alpha is never touched.
//!
//! # Substitution policy
//!
//! Within a single [`recolor_garments`] call the substitutions can either be
//! matched against the raster as it was when the call started
//! ([`SubstitutionPolicy::Snapshot`], the default) or applied one after the
//! other to the evolving raster ([`SubstitutionPolicy::Chained`]). The two
//! only differ when a new color equals a later old color: chained mode then
//! recolors those pixels a second time.
//!
//! # Example
//!
//! ```
//! use image::{Rgba, RgbaImage};
//! use recolor::color::Color;
//! use recolor::recolor::replace_color;
//!
//! let raster = RgbaImage::from_pixel(2, 2, Rgba([10, 10, 10, 128]));
//! let result = replace_color(&raster, Color::new(10, 10, 10), Color::new(200, 0, 0));
//! assert_eq!(result.get_pixel(1, 1), &Rgba([200, 0, 0, 128]));
//! ```

use clap::ValueEnum;
use image::RgbaImage;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use thiserror::Error;

use crate::catalog::{PaletteCatalog, PaletteError};
use crate::color::Color;
use crate::models::{GarmentGroup, GarmentGroupMismatch, PlayerAssignment, Uniform};

/// How substitutions within one recolor call see each other's writes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum SubstitutionPolicy {
    /// Match every substitution against the raster as it was when the call
    /// started. The first pair for a given old color wins, and each pixel is
    /// written at most once.
    #[default]
    Snapshot,
    /// Apply substitutions in order to the evolving raster. A later pair may
    /// recolor pixels written by an earlier one.
    Chained,
}

/// Errors from recoloring a raster.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum RecolorError {
    /// A requested garment group does not exist on a uniform
    #[error(transparent)]
    GarmentGroupMismatch(#[from] GarmentGroupMismatch),
    /// Team lookup failed while resolving a player's uniforms
    #[error(transparent)]
    Palette(#[from] PaletteError),
}

/// One color pair a recolor call will apply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Substitution {
    pub group: GarmentGroup,
    /// Slot label on the old uniform
    pub label: String,
    pub old: Color,
    pub new: Color,
}

/// Two substitutions that leave a source color different under
/// [`SubstitutionPolicy::Chained`] than under [`SubstitutionPolicy::Snapshot`].
///
/// `earlier` is the first pair reading the source color and `later` the pair
/// that recolors its output again in chained mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChainedConflict {
    pub earlier: usize,
    pub later: usize,
}

/// Replace every pixel whose RGB equals `old` with `new`, keeping alpha.
///
/// Returns a new raster; `raster` is not modified.
pub fn replace_color(raster: &RgbaImage, old: Color, new: Color) -> RgbaImage {
    let mut result = raster.clone();
    for pixel in result.pixels_mut() {
        if old.matches(pixel) {
            new.paint(pixel);
        }
    }
    result
}

/// Collect the color pairs for the given garment groups, in application order.
///
/// Pairs where either side has no color are skipped. When the two garments
/// have a different number of slots, the extra slots are ignored.
pub fn substitution_pairs(
    old_uniform: &Uniform,
    new_uniform: &Uniform,
    groups: &[GarmentGroup],
) -> Vec<Substitution> {
    let mut pairs = Vec::new();
    for &group in groups {
        let old_slots = old_uniform.garment(group).slots();
        let new_slots = new_uniform.garment(group).slots();
        for (old_slot, new_slot) in old_slots.iter().zip(new_slots) {
            if let (Some(old), Some(new)) = (old_slot.color, new_slot.color) {
                pairs.push(Substitution { group, label: old_slot.label.clone(), old, new });
            }
        }
    }
    pairs
}

/// Find source colors whose final color depends on the substitution policy.
///
/// Only colors that some pair reads can change, and snapshot mode gives each
/// of them the `new` of the first pair reading it. A conflict is reported when
/// running the remaining pairs in order ends on a different color; `later` is
/// the first pair that moved the pixel off the snapshot result.
pub fn chained_conflicts(pairs: &[Substitution]) -> Vec<ChainedConflict> {
    let mut conflicts = Vec::new();
    let mut seen = HashSet::new();
    for (earlier, first) in pairs.iter().enumerate() {
        if !seen.insert(first.old) {
            continue;
        }
        let mut current = first.new;
        let mut later = None;
        for (offset, pair) in pairs[earlier + 1..].iter().enumerate() {
            if pair.old == current && pair.new != current {
                later.get_or_insert(earlier + 1 + offset);
                current = pair.new;
            }
        }
        if let Some(later) = later.filter(|_| current != first.new) {
            conflicts.push(ChainedConflict { earlier, later });
        }
    }
    conflicts
}

/// Swap the colors of `old_uniform` for `new_uniform` in the given garment groups.
///
/// Groups are processed in the order given. Returns a new raster; an empty
/// group list or a set of pairs that are all skipped yields a copy of the input.
pub fn recolor_garments(
    raster: &RgbaImage,
    old_uniform: &Uniform,
    new_uniform: &Uniform,
    groups: &[GarmentGroup],
    policy: SubstitutionPolicy,
) -> RgbaImage {
    let pairs = substitution_pairs(old_uniform, new_uniform, groups);
    apply_substitutions(raster, &pairs, policy)
}

/// Like [`recolor_garments`] but with garment groups given by name.
///
/// All names are resolved before any pixel is touched.
pub fn recolor_garments_named<S: AsRef<str>>(
    raster: &RgbaImage,
    old_uniform: &Uniform,
    new_uniform: &Uniform,
    names: &[S],
    policy: SubstitutionPolicy,
) -> Result<RgbaImage, RecolorError> {
    let groups = names
        .iter()
        .map(|name| name.as_ref().parse::<GarmentGroup>())
        .collect::<Result<Vec<_>, _>>()?;
    Ok(recolor_garments(raster, old_uniform, new_uniform, &groups, policy))
}

/// Apply a list of substitutions under the given policy.
pub fn apply_substitutions(
    raster: &RgbaImage,
    pairs: &[Substitution],
    policy: SubstitutionPolicy,
) -> RgbaImage {
    match policy {
        SubstitutionPolicy::Chained => {
            let mut current = raster.clone();
            for pair in pairs {
                current = replace_color(&current, pair.old, pair.new);
            }
            current
        }
        SubstitutionPolicy::Snapshot => {
            let mut table: HashMap<[u8; 3], Color> = HashMap::with_capacity(pairs.len());
            for pair in pairs {
                table.entry(pair.old.channels()).or_insert(pair.new);
            }

            let mut result = raster.clone();
            if table.is_empty() {
                return result;
            }
            for pixel in result.pixels_mut() {
                if let Some(new) = table.get(&[pixel[0], pixel[1], pixel[2]]) {
                    new.paint(pixel);
                }
            }
            result
        }
    }
}

/// Recolor a base-colored raster with a primary and a secondary uniform.
///
/// Hat and jersey take the primary uniform's colors; brim, sleeves and collar
/// take the secondary's. Both passes read their old colors from `base`, and
/// the second pass runs on the output of the first.
pub fn recolor_two_pass(
    source: &RgbaImage,
    base: &Uniform,
    primary: &Uniform,
    secondary: &Uniform,
    policy: SubstitutionPolicy,
) -> RgbaImage {
    let with_primary = recolor_garments(source, base, primary, &GarmentGroup::PRIMARY, policy);
    recolor_garments(&with_primary, base, secondary, &GarmentGroup::SECONDARY, policy)
}

/// Recolor one player's source raster according to their team assignment.
///
/// Fails before touching any pixel if the catalog has no base team or either
/// assigned team is unknown.
pub fn recolor_player(
    source: &RgbaImage,
    catalog: &PaletteCatalog,
    assignment: &PlayerAssignment,
    policy: SubstitutionPolicy,
) -> Result<RgbaImage, RecolorError> {
    let base = catalog.base()?;
    let primary = catalog.get(&assignment.primary)?;
    let secondary = catalog.get(&assignment.secondary)?;
    Ok(recolor_two_pass(source, &base.uniform, &primary.uniform, &secondary.uniform, policy))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{GarmentColors, Team};

    const BLACKISH: Color = Color::new(10, 10, 10);
    const GREY: Color = Color::new(20, 20, 20);
    const TRIM: Color = Color::new(30, 30, 30);
    const WHITE: Color = Color::new(200, 200, 200);
    const RED: Color = Color::new(255, 0, 0);
    const BLUE: Color = Color::new(0, 0, 255);

    fn raster(pixels: &[[u8; 4]], width: u32) -> RgbaImage {
        let height = pixels.len() as u32 / width;
        let raw: Vec<u8> = pixels.iter().flatten().copied().collect();
        RgbaImage::from_raw(width, height, raw).unwrap()
    }

    fn pixels(image: &RgbaImage) -> Vec<[u8; 4]> {
        image.pixels().map(|p| p.0).collect()
    }

    fn uniform(hat: GarmentColors, collar: GarmentColors, jersey: GarmentColors) -> Uniform {
        Uniform { hat, brim_sleeves_collar: collar, jersey }
    }

    fn one(label: &str, color: Option<Color>) -> GarmentColors {
        GarmentColors::new().with(label, color)
    }

    fn base_uniform() -> Uniform {
        uniform(one("crown", Some(BLACKISH)), one("trim", Some(TRIM)), one("body", Some(GREY)))
    }

    #[test]
    fn test_replace_color_scenario_preserves_alpha() {
        let source = raster(
            &[[10, 10, 10, 255], [20, 20, 20, 255], [10, 10, 10, 128], [255, 0, 0, 255]],
            2,
        );
        let result = replace_color(&source, BLACKISH, WHITE);
        assert_eq!(
            pixels(&result),
            vec![[200, 200, 200, 255], [20, 20, 20, 255], [200, 200, 200, 128], [255, 0, 0, 255]]
        );
    }

    #[test]
    fn test_replace_color_does_not_mutate_input() {
        let source = raster(&[[10, 10, 10, 255]], 1);
        let before = source.clone();
        let _ = replace_color(&source, BLACKISH, WHITE);
        assert_eq!(source, before);
    }

    #[test]
    fn test_replace_color_same_color_is_identity() {
        let source = raster(
            &[[10, 10, 10, 0], [10, 10, 10, 77], [1, 2, 3, 255], [10, 10, 10, 255]],
            2,
        );
        for color in [BLACKISH, Color::new(1, 2, 3), RED] {
            assert_eq!(replace_color(&source, color, color), source);
        }
    }

    #[test]
    fn test_replace_color_changes_only_matching_pixels() {
        let source = raster(
            &[
                [10, 10, 10, 1],
                [10, 10, 11, 2],
                [11, 10, 10, 3],
                [10, 11, 10, 4],
                [10, 10, 10, 5],
                [0, 0, 0, 6],
            ],
            3,
        );
        let result = replace_color(&source, BLACKISH, RED);
        for (before, after) in source.pixels().zip(result.pixels()) {
            assert_eq!(before[3], after[3], "alpha must be preserved");
            if BLACKISH.matches(before) {
                assert!(RED.matches(after));
            } else {
                assert_eq!(before, after);
            }
        }
    }

    #[test]
    fn test_recolor_empty_group_list_is_identity() {
        let source = raster(&[[10, 10, 10, 255], [20, 20, 20, 255]], 2);
        let target = uniform(one("crown", Some(RED)), one("trim", Some(RED)), one("body", Some(RED)));
        for policy in [SubstitutionPolicy::Snapshot, SubstitutionPolicy::Chained] {
            let result = recolor_garments(&source, &base_uniform(), &target, &[], policy);
            assert_eq!(result, source);
        }
    }

    #[test]
    fn test_recolor_all_null_pairs_is_identity() {
        let source = raster(&[[10, 10, 10, 255], [20, 20, 20, 255], [30, 30, 30, 9]], 3);
        let target = uniform(one("crown", None), one("trim", None), one("body", None));
        let result =
            recolor_garments(&source, &base_uniform(), &target, &GarmentGroup::ALL, Default::default());
        assert_eq!(result, source);

        // Old side absent skips just the same
        let empty_base = uniform(one("crown", None), one("trim", None), one("body", None));
        let result =
            recolor_garments(&source, &empty_base, &base_uniform(), &GarmentGroup::ALL, Default::default());
        assert_eq!(result, source);
    }

    #[test]
    fn test_recolor_skips_null_new_color() {
        let old = uniform(one("crown", Some(BLACKISH)), GarmentColors::new(), one("body", Some(GREY)));
        let new = uniform(one("crown", Some(WHITE)), GarmentColors::new(), one("body", None));
        let source = raster(&[[10, 10, 10, 255], [20, 20, 20, 255]], 2);

        let result = recolor_garments(
            &source,
            &old,
            &new,
            &[GarmentGroup::Hat, GarmentGroup::Jersey],
            SubstitutionPolicy::Snapshot,
        );
        assert_eq!(pixels(&result), vec![[200, 200, 200, 255], [20, 20, 20, 255]]);
    }

    #[test]
    fn test_recolor_only_touches_requested_groups() {
        let source = raster(&[[10, 10, 10, 255], [20, 20, 20, 255], [30, 30, 30, 255]], 3);
        let target = uniform(one("crown", Some(RED)), one("trim", Some(BLUE)), one("body", Some(WHITE)));

        let result = recolor_garments(
            &source,
            &base_uniform(),
            &target,
            &[GarmentGroup::BrimSleevesCollar],
            SubstitutionPolicy::Snapshot,
        );
        assert_eq!(pixels(&result), vec![[10, 10, 10, 255], [20, 20, 20, 255], [0, 0, 255, 255]]);
    }

    #[test]
    fn test_pairing_is_positional_not_by_label() {
        let old = uniform(
            GarmentColors::new().with("a", Some(BLACKISH)).with("b", Some(GREY)),
            GarmentColors::new(),
            GarmentColors::new(),
        );
        // Labels swapped relative to the old mapping; position decides the pairing
        let new = uniform(
            GarmentColors::new().with("b", Some(RED)).with("a", Some(BLUE)),
            GarmentColors::new(),
            GarmentColors::new(),
        );
        let source = raster(&[[10, 10, 10, 255], [20, 20, 20, 255]], 2);

        let result =
            recolor_garments(&source, &old, &new, &[GarmentGroup::Hat], SubstitutionPolicy::Snapshot);
        assert_eq!(pixels(&result), vec![[255, 0, 0, 255], [0, 0, 255, 255]]);
    }

    #[test]
    fn test_pairing_stops_at_shorter_garment() {
        let old = uniform(
            GarmentColors::new().with("a", Some(BLACKISH)).with("b", Some(GREY)),
            GarmentColors::new(),
            GarmentColors::new(),
        );
        let new = uniform(one("a", Some(RED)), GarmentColors::new(), GarmentColors::new());

        let pairs = substitution_pairs(&old, &new, &[GarmentGroup::Hat]);
        assert_eq!(pairs.len(), 1);
        assert_eq!(pairs[0].label, "a");
        assert_eq!((pairs[0].old, pairs[0].new), (BLACKISH, RED));
    }

    fn chaining_uniforms() -> (Uniform, Uniform) {
        // First pair writes GREY, which the second pair reads
        let old = uniform(
            GarmentColors::new().with("a", Some(BLACKISH)).with("b", Some(GREY)),
            GarmentColors::new(),
            GarmentColors::new(),
        );
        let new = uniform(
            GarmentColors::new().with("a", Some(GREY)).with("b", Some(RED)),
            GarmentColors::new(),
            GarmentColors::new(),
        );
        (old, new)
    }

    #[test]
    fn test_chained_policy_recolors_twice() {
        let (old, new) = chaining_uniforms();
        let source = raster(&[[10, 10, 10, 255], [20, 20, 20, 100]], 2);

        let result =
            recolor_garments(&source, &old, &new, &[GarmentGroup::Hat], SubstitutionPolicy::Chained);
        assert_eq!(pixels(&result), vec![[255, 0, 0, 255], [255, 0, 0, 100]]);
    }

    #[test]
    fn test_snapshot_policy_writes_each_pixel_once() {
        let (old, new) = chaining_uniforms();
        let source = raster(&[[10, 10, 10, 255], [20, 20, 20, 100]], 2);

        let result =
            recolor_garments(&source, &old, &new, &[GarmentGroup::Hat], SubstitutionPolicy::Snapshot);
        assert_eq!(pixels(&result), vec![[20, 20, 20, 255], [255, 0, 0, 100]]);
    }

    #[test]
    fn test_snapshot_first_pair_wins_on_shared_old_color() {
        let old = uniform(
            one("crown", Some(BLACKISH)),
            GarmentColors::new(),
            one("body", Some(BLACKISH)),
        );
        let new = uniform(one("crown", Some(RED)), GarmentColors::new(), one("body", Some(BLUE)));
        let source = raster(&[[10, 10, 10, 255]], 1);

        for policy in [SubstitutionPolicy::Snapshot, SubstitutionPolicy::Chained] {
            let result = recolor_garments(&source, &old, &new, &GarmentGroup::PRIMARY, policy);
            assert_eq!(pixels(&result), vec![[255, 0, 0, 255]], "policy {:?}", policy);
        }
    }

    #[test]
    fn test_chained_conflicts_detects_overlap() {
        let (old, new) = chaining_uniforms();
        let pairs = substitution_pairs(&old, &new, &[GarmentGroup::Hat]);
        assert_eq!(chained_conflicts(&pairs), vec![ChainedConflict { earlier: 0, later: 1 }]);

        let pairs = substitution_pairs(&base_uniform(), &new, &[GarmentGroup::Hat]);
        assert!(chained_conflicts(&pairs).is_empty());
    }

    #[test]
    fn test_chained_conflicts_identity_then_recolor() {
        // GREY is kept by the first pair, then repainted by the second
        let old = uniform(
            GarmentColors::new().with("a", Some(GREY)).with("b", Some(GREY)),
            GarmentColors::new(),
            GarmentColors::new(),
        );
        let new = uniform(
            GarmentColors::new().with("a", Some(GREY)).with("b", Some(RED)),
            GarmentColors::new(),
            GarmentColors::new(),
        );
        let pairs = substitution_pairs(&old, &new, &[GarmentGroup::Hat]);
        assert_eq!(chained_conflicts(&pairs), vec![ChainedConflict { earlier: 0, later: 1 }]);

        let source = raster(&[[20, 20, 20, 255]], 1);
        let snapshot =
            recolor_garments(&source, &old, &new, &[GarmentGroup::Hat], SubstitutionPolicy::Snapshot);
        let chained =
            recolor_garments(&source, &old, &new, &[GarmentGroup::Hat], SubstitutionPolicy::Chained);
        assert_eq!(pixels(&snapshot), vec![[20, 20, 20, 255]]);
        assert_eq!(pixels(&chained), vec![[255, 0, 0, 255]]);
    }

    #[test]
    fn test_chained_conflicts_ignores_later_identity() {
        // The second pair reads GREY but writes it straight back
        let old = uniform(
            GarmentColors::new().with("a", Some(BLACKISH)).with("b", Some(GREY)),
            GarmentColors::new(),
            GarmentColors::new(),
        );
        let new = uniform(
            GarmentColors::new().with("a", Some(GREY)).with("b", Some(GREY)),
            GarmentColors::new(),
            GarmentColors::new(),
        );
        let pairs = substitution_pairs(&old, &new, &[GarmentGroup::Hat]);
        assert!(chained_conflicts(&pairs).is_empty());

        let source = raster(&[[10, 10, 10, 255], [20, 20, 20, 255]], 2);
        for policy in [SubstitutionPolicy::Snapshot, SubstitutionPolicy::Chained] {
            let result = recolor_garments(&source, &old, &new, &[GarmentGroup::Hat], policy);
            assert_eq!(pixels(&result), vec![[20, 20, 20, 255]; 2], "policy {:?}", policy);
        }
    }

    #[test]
    fn test_chained_conflicts_ignores_round_trip() {
        // Chained mode passes through BLUE but lands back on GREY
        let old = uniform(
            GarmentColors::new()
                .with("a", Some(BLACKISH))
                .with("b", Some(GREY))
                .with("c", Some(BLUE)),
            GarmentColors::new(),
            GarmentColors::new(),
        );
        let new = uniform(
            GarmentColors::new()
                .with("a", Some(GREY))
                .with("b", Some(BLUE))
                .with("c", Some(GREY)),
            GarmentColors::new(),
            GarmentColors::new(),
        );
        let pairs = substitution_pairs(&old, &new, &[GarmentGroup::Hat]);
        // BLACKISH ends on GREY both ways, GREY only turns BLUE in snapshot mode
        assert_eq!(chained_conflicts(&pairs), vec![ChainedConflict { earlier: 1, later: 2 }]);

        let source = raster(&[[10, 10, 10, 255], [20, 20, 20, 255]], 2);
        let snapshot =
            recolor_garments(&source, &old, &new, &[GarmentGroup::Hat], SubstitutionPolicy::Snapshot);
        let chained =
            recolor_garments(&source, &old, &new, &[GarmentGroup::Hat], SubstitutionPolicy::Chained);
        assert_eq!(pixels(&snapshot), vec![[20, 20, 20, 255], [0, 0, 255, 255]]);
        assert_eq!(pixels(&chained), vec![[20, 20, 20, 255], [20, 20, 20, 255]]);
    }

    #[test]
    fn test_named_groups_resolve() {
        let source = raster(&[[30, 30, 30, 255]], 1);
        let target = uniform(one("crown", Some(RED)), one("trim", Some(BLUE)), one("body", Some(WHITE)));

        let result = recolor_garments_named(
            &source,
            &base_uniform(),
            &target,
            &["brim-sleeves-collar"],
            SubstitutionPolicy::Snapshot,
        )
        .unwrap();
        assert_eq!(pixels(&result), vec![[0, 0, 255, 255]]);
    }

    #[test]
    fn test_named_groups_reject_unknown_name() {
        let source = raster(&[[10, 10, 10, 255]], 1);
        let result = recolor_garments_named(
            &source,
            &base_uniform(),
            &base_uniform(),
            &["hat", "cleats"],
            SubstitutionPolicy::Snapshot,
        );
        match result {
            Err(RecolorError::GarmentGroupMismatch(GarmentGroupMismatch(name))) => {
                assert_eq!(name, "cleats")
            }
            other => panic!("expected GarmentGroupMismatch, got {:?}", other),
        }
    }

    #[test]
    fn test_two_pass_composition() {
        let primary = uniform(one("crown", Some(RED)), one("trim", Some(RED)), one("body", Some(WHITE)));
        let secondary =
            uniform(one("crown", Some(BLUE)), one("trim", Some(BLUE)), one("body", Some(BLUE)));
        let source = raster(
            &[[10, 10, 10, 255], [20, 20, 20, 200], [30, 30, 30, 255], [5, 6, 7, 0]],
            2,
        );

        let result = recolor_two_pass(
            &source,
            &base_uniform(),
            &primary,
            &secondary,
            SubstitutionPolicy::Snapshot,
        );
        assert_eq!(
            pixels(&result),
            vec![[255, 0, 0, 255], [200, 200, 200, 200], [0, 0, 255, 255], [5, 6, 7, 0]]
        );
    }

    #[test]
    fn test_second_pass_sees_first_pass_output() {
        // Primary paints the crown with the base trim color, which the
        // secondary pass then picks up as collar
        let primary = uniform(one("crown", Some(TRIM)), one("trim", None), one("body", None));
        let secondary = uniform(one("crown", None), one("trim", Some(BLUE)), one("body", None));
        let source = raster(&[[10, 10, 10, 255]], 1);

        for policy in [SubstitutionPolicy::Snapshot, SubstitutionPolicy::Chained] {
            let result = recolor_two_pass(&source, &base_uniform(), &primary, &secondary, policy);
            assert_eq!(pixels(&result), vec![[0, 0, 255, 255]]);
        }
    }

    fn catalog() -> PaletteCatalog {
        let mut catalog = PaletteCatalog::new();
        catalog.insert("Base", Team::new("Base", base_uniform()));
        catalog.insert(
            "Reds",
            Team::new("Reds", uniform(one("crown", Some(RED)), one("trim", Some(RED)), one("body", Some(RED)))),
        );
        catalog.insert(
            "Blues",
            Team::new(
                "Blues",
                uniform(one("crown", Some(BLUE)), one("trim", Some(BLUE)), one("body", Some(BLUE))),
            ),
        );
        catalog
    }

    fn assignment(primary: &str, secondary: &str) -> PlayerAssignment {
        PlayerAssignment {
            primary: primary.to_string(),
            secondary: secondary.to_string(),
            image_filename: "player.png".to_string(),
        }
    }

    #[test]
    fn test_recolor_player() {
        let source = raster(&[[10, 10, 10, 255], [20, 20, 20, 255], [30, 30, 30, 255]], 3);
        let result =
            recolor_player(&source, &catalog(), &assignment("Reds", "Blues"), Default::default())
                .unwrap();
        assert_eq!(pixels(&result), vec![[255, 0, 0, 255], [255, 0, 0, 255], [0, 0, 255, 255]]);
    }

    #[test]
    fn test_recolor_player_unknown_team() {
        let source = raster(&[[10, 10, 10, 255]], 1);
        let result =
            recolor_player(&source, &catalog(), &assignment("Reds", "Greens"), Default::default());
        assert!(matches!(
            result,
            Err(RecolorError::Palette(PaletteError::UnknownTeam(ref name))) if name == "Greens"
        ));
    }

    #[test]
    fn test_recolor_player_missing_base() {
        let mut catalog = PaletteCatalog::new();
        catalog.insert("Reds", Team::new("Reds", Uniform::default()));
        let source = raster(&[[10, 10, 10, 255]], 1);

        let result = recolor_player(&source, &catalog, &assignment("Reds", "Reds"), Default::default());
        assert!(matches!(result, Err(RecolorError::Palette(PaletteError::MissingBaseTeam))));
    }

    #[test]
    fn test_policy_parses_from_config_text() {
        #[derive(Deserialize)]
        struct Wrapper {
            policy: SubstitutionPolicy,
        }
        let parsed: Wrapper = toml::from_str("policy = \"chained\"").unwrap();
        assert_eq!(parsed.policy, SubstitutionPolicy::Chained);
        assert_eq!(SubstitutionPolicy::default(), SubstitutionPolicy::Snapshot);
    }
}
