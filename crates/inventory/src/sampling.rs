//! Stratified sampling of the product table, used for spot-check reporting.

use std::collections::BTreeMap;

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

use crate::product::Product;

/// Draw a proportional sample from each category grouping.
///
/// Each category contributes `floor(len * fraction)` items, but never fewer
/// than one, drawn without replacement. The RNG is seeded so a given
/// inventory always yields the same sample; categories are visited in sorted
/// order for the same reason.
pub fn stratified_sample(produtos: &[Product], fraction: f64, seed: u64) -> Vec<Product> {
    let mut rng = StdRng::seed_from_u64(seed);

    let mut groups: BTreeMap<&str, Vec<&Product>> = BTreeMap::new();
    for produto in produtos {
        groups.entry(produto.categoria.as_str()).or_default().push(produto);
    }

    let mut sample = Vec::new();
    for (_categoria, group) in groups {
        let take = ((group.len() as f64 * fraction) as usize).max(1);
        sample.extend(
            group
                .choose_multiple(&mut rng, take)
                .map(|produto| (*produto).clone()),
        );
    }
    sample
}

#[cfg(test)]
mod tests {
    use super::*;

    use chrono::Utc;
    use estoque_core::ProductCode;
    use rust_decimal::Decimal;

    fn produto(id: i32, categoria: &str) -> Product {
        Product {
            id,
            codigo: ProductCode::from_sequence(i64::from(id)),
            nome: format!("Produto {id}"),
            categoria: categoria.to_string(),
            unidade: None,
            marca: None,
            fornecedor: None,
            quantidade: 10,
            valor_unitario: Decimal::new(100, 2),
            data_cadastro: Utc::now(),
        }
    }

    fn inventory() -> Vec<Product> {
        let mut produtos = Vec::new();
        for id in 1..=30 {
            produtos.push(produto(id, "Ferramentas"));
        }
        for id in 31..=40 {
            produtos.push(produto(id, "Limpeza"));
        }
        produtos.push(produto(41, "Diversos"));
        produtos
    }

    #[test]
    fn samples_ten_percent_of_each_category() {
        let sample = stratified_sample(&inventory(), 0.10, 42);
        assert_eq!(
            sample.iter().filter(|p| p.categoria == "Ferramentas").count(),
            3
        );
        assert_eq!(sample.iter().filter(|p| p.categoria == "Limpeza").count(), 1);
    }

    #[test]
    fn every_category_contributes_at_least_one_item() {
        let sample = stratified_sample(&inventory(), 0.10, 42);
        assert_eq!(
            sample.iter().filter(|p| p.categoria == "Diversos").count(),
            1
        );
    }

    #[test]
    fn same_seed_yields_same_sample() {
        let produtos = inventory();
        let a = stratified_sample(&produtos, 0.10, 42);
        let b = stratified_sample(&produtos, 0.10, 42);
        assert_eq!(a, b);
    }

    #[test]
    fn empty_inventory_yields_empty_sample() {
        assert!(stratified_sample(&[], 0.10, 42).is_empty());
    }

    #[test]
    fn sample_items_come_from_the_inventory() {
        let produtos = inventory();
        let sample = stratified_sample(&produtos, 0.10, 42);
        for item in &sample {
            assert!(produtos.contains(item));
        }
    }
}
