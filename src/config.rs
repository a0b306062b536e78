//! Gesture table: which gestures exist, how they are triggered, and which
//! overlay asset each one resolves to.
//!
//! The table is loaded once at startup and validated eagerly: duplicate ids
//! and unresolvable assets disable the affected entry (reported once, never
//! selectable afterwards) rather than failing the whole engine. Only a table
//! with zero surviving entries is fatal.

use std::collections::HashMap;
use std::fmt;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::{info, warn};

use crate::error::Error;

/// Identifier of a configured gesture, unique within a table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Deserialize)]
#[serde(transparent)]
pub struct GestureId(pub u32);

impl fmt::Display for GestureId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Built-in geometric rule slots a gesture may be bound to. The slot order
/// inside the rule classifier is fixed; this only names the slots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RuleKind {
    TwoHandSymmetric,
    FingerCenter,
    FingerCorner,
    EarTouch,
}

/// One validated gesture entry.
#[derive(Debug, Clone)]
pub struct GestureSpec {
    pub id: GestureId,
    pub name: String,
    /// Overlay image the compositor blends in while this gesture is active.
    pub asset: PathBuf,
    /// Rule slot binding for the rule-based classifier path.
    pub rule: Option<RuleKind>,
    /// Model class index binding for the learned classifier path.
    pub class: Option<usize>,
}

#[derive(Debug, Deserialize)]
struct RawTable {
    #[serde(default, rename = "gesture")]
    gestures: Vec<RawGesture>,
}

#[derive(Debug, Deserialize)]
struct RawGesture {
    id: u32,
    name: String,
    asset: PathBuf,
    #[serde(default)]
    rule: Option<RuleKind>,
    #[serde(default)]
    class: Option<usize>,
}

/// The validated, immutable gesture table.
#[derive(Debug)]
pub struct GestureTable {
    by_id: HashMap<GestureId, GestureSpec>,
    /// Declaration order of surviving entries; rule and class bindings
    /// resolve to the first declared match.
    order: Vec<GestureId>,
}

impl GestureTable {
    /// Load and validate a TOML gesture table from disk.
    pub fn from_toml_path(path: &Path) -> Result<Self, Error> {
        let text = std::fs::read_to_string(path).map_err(|source| Error::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;
        let raw: RawTable = toml::from_str(&text)?;
        let specs = raw
            .gestures
            .into_iter()
            .map(|g| GestureSpec {
                id: GestureId(g.id),
                name: g.name,
                asset: g.asset,
                rule: g.rule,
                class: g.class,
            })
            .collect();
        Self::from_specs(specs)
    }

    /// Validate a list of gesture entries into a table.
    pub fn from_specs(specs: Vec<GestureSpec>) -> Result<Self, Error> {
        let mut by_id = HashMap::new();
        let mut order = Vec::new();

        for spec in specs {
            if by_id.contains_key(&spec.id) {
                warn!(id = %spec.id, name = %spec.name, "duplicate gesture id, entry disabled");
                continue;
            }
            if spec.rule.is_none() && spec.class.is_none() {
                warn!(id = %spec.id, name = %spec.name, "gesture has no trigger binding, entry disabled");
                continue;
            }
            if let Err(err) = resolve_asset(&spec.asset) {
                warn!(
                    id = %spec.id,
                    name = %spec.name,
                    asset = %spec.asset.display(),
                    %err,
                    "asset unresolvable, entry disabled"
                );
                continue;
            }
            order.push(spec.id);
            by_id.insert(spec.id, spec);
        }

        if order.is_empty() {
            return Err(Error::NoUsableGestures);
        }

        info!(gestures = order.len(), "gesture table loaded");
        Ok(Self { by_id, order })
    }

    /// The shipped two-gesture configuration, with assets resolved under
    /// `asset_dir`. Usable without a TOML file.
    pub fn default_table(asset_dir: &Path) -> Result<Self, Error> {
        Self::from_specs(vec![
            GestureSpec {
                id: GestureId(1),
                name: "donk".into(),
                asset: asset_dir.join("donk.png"),
                rule: Some(RuleKind::FingerCenter),
                class: Some(0),
            },
            GestureSpec {
                id: GestureId(2),
                name: "monkey-think".into(),
                asset: asset_dir.join("monkey_think.png"),
                rule: Some(RuleKind::FingerCorner),
                class: Some(1),
            },
        ])
    }

    pub fn get(&self, id: GestureId) -> Option<&GestureSpec> {
        self.by_id.get(&id)
    }

    /// First declared gesture bound to a rule slot, if any.
    pub fn rule_binding(&self, kind: RuleKind) -> Option<GestureId> {
        self.order
            .iter()
            .copied()
            .find(|id| self.by_id[id].rule == Some(kind))
    }

    /// First declared gesture bound to a model class index, if any.
    pub fn class_binding(&self, class: usize) -> Option<GestureId> {
        self.order
            .iter()
            .copied()
            .find(|id| self.by_id[id].class == Some(class))
    }

    /// Surviving entries in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = &GestureSpec> {
        self.order.iter().map(move |id| &self.by_id[id])
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}

/// An asset reference resolves when the file exists and has a readable
/// image header.
fn resolve_asset(path: &Path) -> Result<(), image::ImageError> {
    image::image_dimensions(path).map(|_| ())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write_png(dir: &Path, name: &str) -> PathBuf {
        let path = dir.join(name);
        image::RgbaImage::new(4, 4).save(&path).unwrap();
        path
    }

    fn spec(id: u32, name: &str, asset: PathBuf, rule: Option<RuleKind>) -> GestureSpec {
        GestureSpec {
            id: GestureId(id),
            name: name.into(),
            asset,
            rule,
            class: None,
        }
    }

    #[test]
    fn duplicate_id_disables_later_entry() {
        let dir = tempfile::tempdir().unwrap();
        let a = write_png(dir.path(), "a.png");
        let b = write_png(dir.path(), "b.png");
        let table = GestureTable::from_specs(vec![
            spec(1, "first", a, Some(RuleKind::FingerCenter)),
            spec(1, "second", b, Some(RuleKind::FingerCorner)),
        ])
        .unwrap();
        assert_eq!(table.len(), 1);
        assert_eq!(table.get(GestureId(1)).unwrap().name, "first");
        assert!(table.rule_binding(RuleKind::FingerCorner).is_none());
    }

    #[test]
    fn missing_asset_disables_entry() {
        let dir = tempfile::tempdir().unwrap();
        let good = write_png(dir.path(), "good.png");
        let table = GestureTable::from_specs(vec![
            spec(1, "good", good, Some(RuleKind::FingerCenter)),
            spec(
                2,
                "broken",
                dir.path().join("missing.png"),
                Some(RuleKind::FingerCorner),
            ),
        ])
        .unwrap();
        assert_eq!(table.len(), 1);
        assert!(table.get(GestureId(2)).is_none());
    }

    #[test]
    fn unbound_entry_is_disabled() {
        let dir = tempfile::tempdir().unwrap();
        let a = write_png(dir.path(), "a.png");
        let b = write_png(dir.path(), "b.png");
        let table = GestureTable::from_specs(vec![
            spec(1, "bound", a, Some(RuleKind::EarTouch)),
            spec(2, "unbound", b, None),
        ])
        .unwrap();
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn all_invalid_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let result = GestureTable::from_specs(vec![spec(
            1,
            "broken",
            dir.path().join("missing.png"),
            Some(RuleKind::FingerCenter),
        )]);
        assert!(matches!(result, Err(Error::NoUsableGestures)));
    }

    #[test]
    fn toml_round_trip_with_bindings() {
        let dir = tempfile::tempdir().unwrap();
        let asset = write_png(dir.path(), "donk.png");
        let config = format!(
            r#"
            [[gesture]]
            id = 1
            name = "donk"
            rule = "finger-center"
            class = 0
            asset = {asset:?}
            "#,
            asset = asset,
        );
        let config_path = dir.path().join("gestures.toml");
        std::fs::write(&config_path, config).unwrap();

        let table = GestureTable::from_toml_path(&config_path).unwrap();
        assert_eq!(table.len(), 1);
        assert_eq!(
            table.rule_binding(RuleKind::FingerCenter),
            Some(GestureId(1))
        );
        assert_eq!(table.class_binding(0), Some(GestureId(1)));
        assert_eq!(table.class_binding(1), None);
    }

    #[test]
    fn bindings_resolve_in_declaration_order() {
        let dir = tempfile::tempdir().unwrap();
        let a = write_png(dir.path(), "a.png");
        let b = write_png(dir.path(), "b.png");
        let table = GestureTable::from_specs(vec![
            spec(5, "first", a, Some(RuleKind::EarTouch)),
            spec(3, "second", b, Some(RuleKind::EarTouch)),
        ])
        .unwrap();
        assert_eq!(table.rule_binding(RuleKind::EarTouch), Some(GestureId(5)));
    }
}
