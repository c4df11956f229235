use super::*;
use crate::model::layer::{ImageContent, LayerType, PreComposeContent, TextContent};
use crate::model::mask::Mask;
use crate::model::text::TextPathOption;

fn file_with(layers: Vec<Layer>) -> File {
    File {
        compositions: vec![Composition {
            id: 1,
            layers,
            ..Composition::default()
        }],
        images: vec![ImageAsset {
            id: 5,
            ..ImageAsset::default()
        }],
        ..File::default()
    }
}

#[test]
fn dangling_references_are_dropped() {
    let mut parented = Layer::new(10, LayerType::Null);
    parented.parent = Some(99);
    let mut image = Layer::new(11, LayerType::Image);
    image.content = LayerContent::Image(ImageContent {
        image_id: Some(6),
        fill_rule: None,
    });
    let mut pre = Layer::new(12, LayerType::PreCompose);
    pre.content = LayerContent::PreCompose(PreComposeContent {
        composition_id: Some(2),
        composition_start_time: 0,
    });
    let mut text = Layer::new(13, LayerType::Text);
    text.masks.push(Mask::default());
    text.content = LayerContent::Text(TextContent {
        path_option: Some(TextPathOption {
            path_mask: Some(1),
            ..TextPathOption::default()
        }),
        ..TextContent::default()
    });

    let mut file = file_with(vec![parented, image, pre, text]);
    file.resolve_references();
    let layers = &file.compositions[0].layers;
    assert_eq!(layers[0].parent, None);
    assert!(matches!(&layers[1].content, LayerContent::Image(c) if c.image_id.is_none()));
    assert!(matches!(
        &layers[2].content,
        LayerContent::PreCompose(c) if c.composition_id.is_none()
    ));
    assert!(matches!(
        &layers[3].content,
        LayerContent::Text(c) if c.path_option.as_ref().is_some_and(|o| o.path_mask.is_none())
    ));
}

#[test]
fn valid_references_survive() {
    let mut child = Layer::new(2, LayerType::Null);
    child.parent = Some(1);
    let mut image = Layer::new(3, LayerType::Image);
    image.content = LayerContent::Image(ImageContent {
        image_id: Some(5),
        fill_rule: None,
    });
    let mut file = file_with(vec![Layer::new(1, LayerType::Null), child, image]);
    let before = file.clone();
    file.resolve_references();
    assert_eq!(file, before);
}

#[test]
fn verify_requires_a_composition() {
    assert!(matches!(File::default().verify(), Err(PagError::Validation(_))));
    assert!(file_with(Vec::new()).verify().is_ok());
}

#[test]
fn verify_rejects_duplicate_layer_ids() {
    let file = file_with(vec![
        Layer::new(1, LayerType::Null),
        Layer::new(1, LayerType::Solid),
    ]);
    assert!(file.verify().is_err());
}

#[test]
fn lookups() {
    let file = file_with(vec![Layer::new(4, LayerType::Null)]);
    assert!(file.composition(1).is_some());
    assert!(file.composition(2).is_none());
    assert!(file.image(5).is_some());
    assert_eq!(file.main_composition().map(|c| c.id), Some(1));
    assert_eq!(file.layer_count(), 1);
    assert!(file.compositions[0].layer(4).is_some());
}
