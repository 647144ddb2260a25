//! Sprite sheets and sprite placement
//!
//! Each action of a character is a horizontal strip of equally wide frames.
//! Placement works in arena coordinates; backends only scale to their surface.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::core::config::RenderConfig;
use crate::core::types::{CharacterKind, Rect, Slot};
use crate::fighter::{Action, Fighter};

fn sheet_file(action: Action) -> &'static str {
    match action {
        Action::Idle => "Idle.png",
        Action::Run => "Run.png",
        Action::Jump => "Jump.png",
        Action::Attack1 => "Attack1.png",
        Action::Attack2 => "Attack2.png",
        Action::Hit => "Take hit.png",
        Action::Death => "Death.png",
    }
}

fn character_dir(character: CharacterKind) -> &'static str {
    match character {
        CharacterKind::Swordsman => "swordsman",
        CharacterKind::Demon => "demon",
    }
}

/// Sheet paths and load state for one character.
///
/// A sheet that is not ready yet is skipped by the frame driver; it is
/// drawn on a later tick once marked ready.
#[derive(Clone, Debug)]
pub struct SpriteManifest {
    pub character: CharacterKind,
    sheets: HashMap<Action, PathBuf>,
    ready: HashMap<Action, bool>,
}

impl SpriteManifest {
    /// Manifest for `<root>/<character>/Sprites/<Action>.png`
    pub fn for_character(character: CharacterKind, root: &Path) -> Self {
        let dir = root.join(character_dir(character)).join("Sprites");
        let sheets = Action::ALL
            .iter()
            .map(|&action| (action, dir.join(sheet_file(action))))
            .collect();

        Self {
            character,
            sheets,
            ready: Action::ALL.iter().map(|&a| (a, false)).collect(),
        }
    }

    pub fn is_ready(&self, action: Action) -> bool {
        self.ready.get(&action).copied().unwrap_or(false)
    }

    pub fn mark_ready(&mut self, action: Action) {
        self.ready.insert(action, true);
    }

    pub fn mark_all_ready(&mut self) {
        for ready in self.ready.values_mut() {
            *ready = true;
        }
    }

    /// Mark every sheet present on disk as ready. Returns how many are.
    pub fn probe(&mut self) -> usize {
        let mut found = 0;
        for (action, path) in &self.sheets {
            let exists = path.is_file();
            if !exists {
                tracing::warn!(character = ?self.character, path = %path.display(), "sprite sheet missing");
            }
            self.ready.insert(*action, exists);
            found += usize::from(exists);
        }
        found
    }
}

/// Manifests for both slots
#[derive(Clone, Debug)]
pub struct SpriteLibrary {
    manifests: [SpriteManifest; 2],
}

impl SpriteLibrary {
    pub fn new(characters: [CharacterKind; 2], root: &Path) -> Self {
        Self {
            manifests: [
                SpriteManifest::for_character(characters[0], root),
                SpriteManifest::for_character(characters[1], root),
            ],
        }
    }

    /// Library whose sheets are all drawable (backends with stand-in art)
    pub fn placeholder(characters: [CharacterKind; 2]) -> Self {
        let mut library = Self::new(characters, Path::new("assets"));
        for manifest in &mut library.manifests {
            manifest.mark_all_ready();
        }
        library
    }

    pub fn manifest(&self, slot: Slot) -> &SpriteManifest {
        &self.manifests[slot.index()]
    }

    pub fn manifest_mut(&mut self, slot: Slot) -> &mut SpriteManifest {
        &mut self.manifests[slot.index()]
    }

    pub fn probe(&mut self) -> usize {
        self.manifests.iter_mut().map(SpriteManifest::probe).sum()
    }
}

/// Everything needed to draw one fighter's current frame
#[derive(Clone, Debug, PartialEq)]
pub struct SpriteFrame {
    pub slot: Slot,
    pub character: CharacterKind,
    pub action: Action,
    pub frame: u8,
    pub frame_count: u8,
    /// Destination box in arena space
    pub dest: Rect,
    /// Image flipped horizontally inside `dest`
    pub mirrored: bool,
    /// Body box, for debug outlines
    pub body: Rect,
}

impl SpriteFrame {
    /// Drawn `sprite_scale` times the body box, shifted left by the offset and
    /// lifted by half the drawn height.
    pub fn place(fighter: &Fighter, render: &RenderConfig) -> Self {
        let width = fighter.width * render.sprite_scale;
        let height = fighter.height * render.sprite_scale;
        let action = fighter.action();

        Self {
            slot: fighter.slot,
            character: fighter.character,
            action,
            frame: fighter.animation.frame,
            frame_count: fighter.clips.frame_count(action),
            dest: Rect::new(
                fighter.position.x - render.sprite_offset_x,
                fighter.position.y - height / 2.0,
                width,
                height,
            ),
            mirrored: fighter.facing_flipped,
            body: fighter.body_rect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::DuelConfig;
    use crate::core::types::ControllerKind;
    use crate::fighter::FighterSpec;

    #[test]
    fn test_manifest_readiness() {
        let mut manifest = SpriteManifest::for_character(CharacterKind::Demon, Path::new("assets"));
        assert!(!manifest.is_ready(Action::Idle));
        manifest.mark_ready(Action::Idle);
        assert!(manifest.is_ready(Action::Idle));
        assert!(!manifest.is_ready(Action::Run));
    }

    #[test]
    fn test_sheets_found_by_action() {
        let root = std::env::temp_dir().join(format!("duel-arena-sprites-{}", std::process::id()));
        let dir = root.join("demon").join("Sprites");
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(dir.join("Take hit.png"), b"").unwrap();

        let mut manifest = SpriteManifest::for_character(CharacterKind::Demon, &root);
        assert_eq!(manifest.probe(), 1);
        assert!(manifest.is_ready(Action::Hit));
        assert!(!manifest.is_ready(Action::Idle));

        // Same tree, other character: nothing there
        let mut swordsman = SpriteManifest::for_character(CharacterKind::Swordsman, &root);
        assert_eq!(swordsman.probe(), 0);

        std::fs::remove_dir_all(&root).unwrap();
    }

    #[test]
    fn test_missing_sheets_stay_unready() {
        let mut library = SpriteLibrary::new(
            [CharacterKind::Swordsman, CharacterKind::Demon],
            Path::new("no/such/assets"),
        );
        assert_eq!(library.probe(), 0);
        assert!(!library.manifest(Slot::P1).is_ready(Action::Idle));
    }

    #[test]
    fn test_sprite_placement() {
        let config = DuelConfig::default();
        let mut fighter = Fighter::new(
            FighterSpec::from_config(Slot::P1, ControllerKind::Human, CharacterKind::Swordsman, &config),
            &config,
        )
        .unwrap();
        fighter.position = glam::Vec2::new(200.0, 296.0);

        let sprite = SpriteFrame::place(&fighter, &config.render);
        assert_eq!(sprite.dest, Rect::new(160.0, -64.0, 480.0, 720.0));
        assert!(!sprite.mirrored);
        assert_eq!(sprite.frame_count, 8);

        fighter.facing_flipped = true;
        let mirrored = SpriteFrame::place(&fighter, &config.render);
        assert_eq!(mirrored.dest, sprite.dest);
        assert!(mirrored.mirrored);
    }
}
