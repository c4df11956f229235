use std::collections::BTreeSet;

use crate::foundation::core::{Color, Frame, Id};
use crate::foundation::error::{PagError, PagResult};
use crate::model::layer::{Layer, LayerContent};

/// A vector composition: an ordered layer stack with its own canvas and timeline.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct Composition {
    pub id: Id,
    pub width: i32,
    pub height: i32,
    pub duration: Frame,
    pub frame_rate: f32,
    pub background_color: Color,
    /// Top-most layer first.
    pub layers: Vec<Layer>,
}

impl Default for Composition {
    fn default() -> Self {
        Self {
            id: 0,
            width: 0,
            height: 0,
            duration: 0,
            frame_rate: 30.0,
            background_color: Color::WHITE,
            layers: Vec::new(),
        }
    }
}

impl Composition {
    pub fn layer(&self, id: Id) -> Option<&Layer> {
        self.layers.iter().find(|l| l.id == id)
    }
}

/// Encoded bitmap shared by image layers.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct ImageAsset {
    pub id: Id,
    /// Size before a transparent border was stripped from the bitmap, otherwise 0.
    pub width: i32,
    pub height: i32,
    /// Offset of the stripped bitmap inside the original bounds.
    pub anchor_x: i32,
    pub anchor_y: i32,
    /// Ratio between the stored bitmap and its size in the composition.
    pub scale_factor: f32,
    /// Encoded image file (PNG, WebP, ...), kept opaque.
    pub bytes: Vec<u8>,
}

impl Default for ImageAsset {
    fn default() -> Self {
        Self {
            id: 0,
            width: 0,
            height: 0,
            anchor_x: 0,
            anchor_y: 0,
            scale_factor: 1.0,
            bytes: Vec::new(),
        }
    }
}

impl ImageAsset {
    pub fn is_stripped(&self) -> bool {
        self.width != 0 || self.height != 0 || self.anchor_x != 0 || self.anchor_y != 0
    }

    pub fn is_scaled(&self) -> bool {
        self.scale_factor != 1.0
    }
}

/// A decoded file: compositions and the image assets they share.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct File {
    /// Header version the file was read with; ignored when encoding.
    pub version: u8,
    /// Highest tag code met while decoding, the player level needed to read the whole file.
    pub tag_level: u32,
    /// Referenced compositions first; the last one is the root.
    pub compositions: Vec<Composition>,
    pub images: Vec<ImageAsset>,
}

impl File {
    pub fn tag_level(&self) -> u32 {
        self.tag_level
    }

    /// The root composition.
    pub fn main_composition(&self) -> Option<&Composition> {
        self.compositions.last()
    }

    pub fn composition(&self, id: Id) -> Option<&Composition> {
        self.compositions.iter().find(|c| c.id == id)
    }

    pub fn image(&self, id: Id) -> Option<&ImageAsset> {
        self.images.iter().find(|i| i.id == id)
    }

    pub fn layer_count(&self) -> usize {
        self.compositions.iter().map(|c| c.layers.len()).sum()
    }

    /// Drop id references that name nothing in this file.
    ///
    /// Runs after the whole file is decoded, so references may point forwards or backwards.
    pub fn resolve_references(&mut self) {
        let compositions: BTreeSet<Id> = self.compositions.iter().map(|c| c.id).collect();
        let images: BTreeSet<Id> = self.images.iter().map(|i| i.id).collect();
        for composition in &mut self.compositions {
            let layer_ids: BTreeSet<Id> = composition.layers.iter().map(|l| l.id).collect();
            for layer in &mut composition.layers {
                if let Some(parent) = layer.parent
                    && (parent == layer.id || !layer_ids.contains(&parent))
                {
                    tracing::warn!(layer = layer.id, parent, "dropping unknown parent layer");
                    layer.parent = None;
                }
                let mask_count = layer.masks.len();
                match &mut layer.content {
                    LayerContent::PreCompose(pre) => {
                        if let Some(id) = pre.composition_id
                            && !compositions.contains(&id)
                        {
                            tracing::warn!(
                                layer = layer.id,
                                composition = id,
                                "dropping unknown composition reference"
                            );
                            pre.composition_id = None;
                        }
                    }
                    LayerContent::Image(image) => {
                        if let Some(id) = image.image_id
                            && !images.contains(&id)
                        {
                            tracing::warn!(
                                layer = layer.id,
                                image = id,
                                "dropping unknown image reference"
                            );
                            image.image_id = None;
                        }
                    }
                    LayerContent::Text(text) => {
                        if let Some(option) = text.path_option.as_mut()
                            && let Some(index) = option.path_mask
                            && index as usize >= mask_count
                        {
                            tracing::warn!(
                                layer = layer.id,
                                mask = index,
                                "dropping out of range text path mask"
                            );
                            option.path_mask = None;
                        }
                    }
                    _ => {}
                }
            }
        }
    }

    /// Structural checks a decoded file must pass to be handed to a renderer.
    pub fn verify(&self) -> PagResult<()> {
        if self.compositions.is_empty() {
            return Err(PagError::validation("file contains no composition"));
        }
        for composition in &self.compositions {
            let mut ids = BTreeSet::new();
            for layer in &composition.layers {
                if !ids.insert(layer.id) {
                    return Err(PagError::validation(format!(
                        "composition {} has duplicate layer id {}",
                        composition.id, layer.id
                    )));
                }
                if layer.duration <= 0 {
                    return Err(PagError::validation(format!(
                        "layer {} has non-positive duration {}",
                        layer.id, layer.duration
                    )));
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/model/composition.rs"]
mod tests;
