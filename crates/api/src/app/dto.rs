use serde::Deserialize;

use estoque_core::DomainResult;
use estoque_inventory::{parse_price, parse_quantity, NewProduct, ProductDetails};

// -------------------------
// Request DTOs (form-encoded, field names are the form contract)
// -------------------------

#[derive(Debug, Deserialize)]
pub struct AdicionarForm {
    pub nome: String,
    pub categoria: String,
    pub quantidade: String,
    pub valor: String,
    pub unidade: Option<String>,
    pub marca: Option<String>,
    pub fornecedor: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct RetiradaForm {
    pub codigo: String,
    pub quantidade: String,
}

#[derive(Debug, Deserialize)]
pub struct AtualizarEstoqueForm {
    pub codigo: String,
    pub nova_quantidade: Option<String>,
    /// Present when the form's delete button was used instead of adjust.
    pub excluir: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct EditarProdutoForm {
    pub nome: String,
    pub categoria: String,
    pub valor: String,
    pub unidade: Option<String>,
    pub marca: Option<String>,
    pub fornecedor: Option<String>,
}

// -------------------------
// Form-to-domain mapping
// -------------------------

impl AdicionarForm {
    pub fn into_new_product(self) -> DomainResult<NewProduct> {
        let quantidade = parse_quantity(&self.quantidade)?;
        let valor = parse_price(&self.valor)?;
        let details = ProductDetails::new(
            &self.nome,
            &self.categoria,
            self.unidade.as_deref(),
            self.marca.as_deref(),
            self.fornecedor.as_deref(),
            valor,
        )?;
        NewProduct::new(details, quantidade)
    }
}

impl EditarProdutoForm {
    pub fn into_details(self) -> DomainResult<ProductDetails> {
        let valor = parse_price(&self.valor)?;
        ProductDetails::new(
            &self.nome,
            &self.categoria,
            self.unidade.as_deref(),
            self.marca.as_deref(),
            self.fornecedor.as_deref(),
            valor,
        )
    }
}
