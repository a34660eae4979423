//! Random variant selection.

use super::{BakedModel, BakedQuad};
use crate::types::{BlockState, Direction};
use log::warn;
use rand::rngs::StdRng;
use rand::Rng;

/// Legacy provider that picks one weighted variant per query.
///
/// The pick draws from the supplied random stream, so a stream reseeded with
/// the same seed selects the same variant for every face of a block.
pub struct WeightedModel {
    variants: Vec<(u32, Box<dyn BakedModel>)>,
    total_weight: u32,
}

impl WeightedModel {
    pub fn new() -> Self {
        Self {
            variants: Vec::new(),
            total_weight: 0,
        }
    }

    /// Add a variant. Zero-weight variants are never picked.
    pub fn with_variant(mut self, weight: u32, model: Box<dyn BakedModel>) -> Self {
        self.total_weight += weight;
        self.variants.push((weight, model));
        self
    }

    pub fn variant_count(&self) -> usize {
        self.variants.len()
    }

    /// Index of the variant selected by the next draw from `rng`.
    pub fn pick(&self, rng: &mut StdRng) -> Option<usize> {
        if self.total_weight == 0 {
            if !self.variants.is_empty() {
                warn!("Weighted model has {} variants but zero total weight", self.variants.len());
            }
            return None;
        }

        let mut roll = rng.gen_range(0..self.total_weight);
        for (index, (weight, _)) in self.variants.iter().enumerate() {
            if roll < *weight {
                return Some(index);
            }
            roll -= weight;
        }
        None
    }
}

impl Default for WeightedModel {
    fn default() -> Self {
        Self::new()
    }
}

impl BakedModel for WeightedModel {
    fn quads(
        &self,
        block: &BlockState,
        cull_face: Option<Direction>,
        rng: &mut StdRng,
    ) -> &[BakedQuad] {
        match self.pick(rng) {
            Some(index) => self.variants[index].1.quads(block, cull_face, rng),
            None => &[],
        }
    }

    fn use_ambient_occlusion(&self) -> bool {
        self.variants
            .first()
            .map_or(true, |(_, model)| model.use_ambient_occlusion())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::SimpleBakedModel;
    use rand::SeedableRng;

    fn variant(tint_index: i32) -> Box<dyn BakedModel> {
        let quad = crate::mesh::Quad::square(Direction::Up, 0.0, 0.0, 1.0, 1.0, 0.5)
            .with_tint_index(tint_index);
        let mut model = SimpleBakedModel::new();
        model.add_quad(None, BakedQuad::encode(&quad));
        Box::new(model)
    }

    #[test]
    fn test_same_seed_picks_same_variant() {
        let model = WeightedModel::new()
            .with_variant(1, variant(0))
            .with_variant(3, variant(1))
            .with_variant(2, variant(2));
        let block = BlockState::new("minecraft:stone");

        for seed in 0..32 {
            let first = model.quads(&block, None, &mut StdRng::seed_from_u64(seed))[0].tint_index;
            let second = model.quads(&block, None, &mut StdRng::seed_from_u64(seed))[0].tint_index;
            assert_eq!(first, second);
        }
    }

    #[test]
    fn test_zero_weight_is_never_picked() {
        let model = WeightedModel::new()
            .with_variant(0, variant(0))
            .with_variant(5, variant(1));
        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..64 {
            assert_eq!(model.pick(&mut rng), Some(1));
        }
    }

    #[test]
    fn test_empty_model_has_no_quads() {
        let model = WeightedModel::default();
        let mut rng = StdRng::seed_from_u64(1);
        assert!(model.quads(&BlockState::air(), None, &mut rng).is_empty());
        assert_eq!(model.variant_count(), 0);
    }
}
