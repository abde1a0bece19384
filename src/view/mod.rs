//! View controller: form state, list rendering, filtering, modals and toast
//! feedback. It talks to the host only through [`ProductApi`].

use std::fmt::Display;

use chrono::{Local, TimeZone};

use crate::{
    bridge::{BridgeError, ProductApi},
    dto::products::ProductInput,
};

pub mod format;
pub mod render;
pub mod sanitize;
pub mod state;

use format::{NumberParseError, edit_preco, parse_decimal};
use render::{EMPTY_FILTER, EMPTY_LIST};
use sanitize::sanitize_numeric;
pub use state::{Field, Toast, ToastVariant, ViewEvent, ViewMode, ViewState};

pub const MSG_REQUIRED: &str = "❌ Todos os campos são obrigatórios.";
pub const MSG_INVALID_NUMBER: &str = "❌ Valor numérico inválido.";
pub const MSG_ADDED: &str = "✅ Produto adicionado com sucesso!";
pub const MSG_ADD_FAILED: &str = "❌ Erro ao adicionar produto.";
pub const MSG_LIST_FAILED: &str = "❌ Erro ao carregar produtos.";
pub const MSG_UPDATED: &str = "✏️ Produto atualizado com sucesso!";
pub const MSG_UPDATE_FAILED: &str = "❌ Erro ao atualizar produto.";
pub const MSG_DELETED: &str = "🗑 Produto excluído com sucesso!";
pub const MSG_DELETE_FAILED: &str = "❌ Erro ao excluir produto.";
pub const CONFIRM_DELETE: &str = "Tem certeza que deseja excluir este produto?";

enum Rejected {
    Bridge(BridgeError),
    Outcome(Option<String>),
}

impl From<BridgeError> for Rejected {
    fn from(err: BridgeError) -> Self {
        Rejected::Bridge(err)
    }
}

/// Timestamps are rendered in `Tz`, resolving the offset for each instant
/// so dates on either side of a daylight-saving change read correctly.
#[derive(Debug)]
pub struct ViewController<A, Tz = Local> {
    api: A,
    tz: Tz,
    state: ViewState,
}

impl<A: ProductApi> ViewController<A, Local> {
    /// Controller rendering timestamps in the host's local zone.
    pub fn new(api: A) -> Self {
        Self::with_timezone(api, Local)
    }
}

impl<A, Tz> ViewController<A, Tz>
where
    A: ProductApi,
    Tz: TimeZone,
    Tz::Offset: Display,
{
    pub fn with_timezone(api: A, tz: Tz) -> Self {
        let mut state = ViewState::default();
        state.filter_html = render::filter_options(&state.nomes, None);
        Self { api, tz, state }
    }

    pub fn state(&self) -> &ViewState {
        &self.state
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    pub async fn handle(&mut self, event: ViewEvent) {
        match event {
            ViewEvent::Input { field, value } => self.input(field, &value),
            ViewEvent::Add => self.add().await,
            ViewEvent::List => {
                if let Err(err) = self.refresh().await {
                    tracing::error!(error = %err, "failed to load products");
                    self.toast(Toast::error(MSG_LIST_FAILED));
                }
            }
            ViewEvent::CloseList => self.state.list_visible = false,
            ViewEvent::Filter { nome } => self.filter(nome).await,
            ViewEvent::Edit { id } => self.begin_edit(id),
            ViewEvent::Delete { id } => self.request_delete(id),
            ViewEvent::ConfirmDelete => self.confirm_delete().await,
            ViewEvent::CancelDelete => {
                if self.state.confirm_open() {
                    self.state.pending_delete = None;
                    self.state.mode = ViewMode::Idle;
                }
            }
            ViewEvent::SaveEdit => self.save_edit().await,
            ViewEvent::CloseEdit => {
                if self.state.edit_open() {
                    self.state.mode = ViewMode::Idle;
                }
            }
        }
    }

    fn toast(&mut self, toast: Toast) {
        match toast.variant {
            ToastVariant::Success => tracing::info!(message = %toast.message, "feedback"),
            ToastVariant::Error => tracing::warn!(message = %toast.message, "feedback"),
        }
        self.state.toast = Some(toast);
    }

    fn input(&mut self, field: Field, raw: &str) {
        let value = if field.is_numeric() {
            let sanitized = sanitize_numeric(raw);
            if sanitized.valid {
                self.state.invalid.remove(&field);
            } else {
                self.state.invalid.insert(field);
            }
            sanitized.value
        } else {
            raw.to_string()
        };

        let slot = match field {
            Field::Nome => &mut self.state.form.nome,
            Field::Quantidade => &mut self.state.form.quantidade,
            Field::Preco => &mut self.state.form.preco,
            Field::EditNome => &mut self.state.edit.nome,
            Field::EditQuantidade => &mut self.state.edit.quantidade,
            Field::EditPreco => &mut self.state.edit.preco,
        };
        *slot = value;
        self.state.focus = Some(field);
    }

    /// Fetch, sort newest first, rebuild the name set and re-render every
    /// card.
    async fn refresh(&mut self) -> Result<(), BridgeError> {
        let mut produtos = self.api.get_product().await?;
        produtos.sort_by(|a, b| b.data_criacao.cmp(&a.data_criacao));

        self.state.nomes = produtos.iter().map(|p| p.nome.clone()).collect();
        self.state.list_visible = true;
        self.state.list_html = render::product_list(&produtos, &self.tz, EMPTY_LIST);
        self.state.produtos = produtos;
        self.state.filtro = None;
        self.state.filter_html = render::filter_options(&self.state.nomes, None);
        Ok(())
    }

    async fn reset_form(&mut self) {
        let form = &mut self.state.form;
        form.disabled = false;
        form.id = None;
        form.nome.clear();
        form.quantidade.clear();
        form.preco.clear();
        form.button = Default::default();
        self.state.invalid.remove(&Field::Quantidade);
        self.state.invalid.remove(&Field::Preco);

        if let Err(err) = self.api.focus_window().await {
            tracing::warn!(error = %err, "focus request not delivered");
        }
        self.state.focus = Some(Field::Nome);
    }

    fn read_input(nome: &str, quantidade: &str, preco: &str) -> Result<ProductInput, Toast> {
        let nome = nome.trim();
        if nome.is_empty() || quantidade.trim().is_empty() || preco.trim().is_empty() {
            return Err(Toast::error(MSG_REQUIRED));
        }
        let number = |raw: &str| {
            parse_decimal(raw).map_err(|err: NumberParseError| {
                tracing::debug!(error = %err, "rejected form value");
                Toast::error(MSG_INVALID_NUMBER)
            })
        };
        Ok(ProductInput {
            nome: nome.to_string(),
            quantidade: number(quantidade)?,
            preco: number(preco)?,
        })
    }

    async fn add(&mut self) {
        self.state.list_visible = true;
        self.state.filtro = None;

        let form = &self.state.form;
        let input = match Self::read_input(&form.nome, &form.quantidade, &form.preco) {
            Ok(input) => input,
            Err(toast) => return self.toast(toast),
        };

        match self.try_add(input).await {
            Ok(()) => self.reset_form().await,
            Err(err) => {
                tracing::error!(error = %err, "add product rejected");
                self.toast(Toast::error(MSG_ADD_FAILED));
            }
        }
    }

    async fn try_add(&mut self, input: ProductInput) -> Result<(), BridgeError> {
        self.api.add_product(input).await?;
        self.toast(Toast::success(MSG_ADDED));
        self.refresh().await
    }

    async fn filter(&mut self, nome: Option<String>) {
        let nome = nome.filter(|n| !n.is_empty());
        let Some(nome) = nome else {
            if let Err(err) = self.refresh().await {
                tracing::error!(error = %err, "failed to reload products");
                self.toast(Toast::error(MSG_LIST_FAILED));
            }
            return;
        };

        let matching = self.state.produtos.iter().filter(|p| p.nome == nome);
        self.state.list_html = render::product_list(matching, &self.tz, EMPTY_FILTER);
        self.state.filter_html = render::filter_options(&self.state.nomes, Some(&nome));
        self.state.filtro = Some(nome);
    }

    fn begin_edit(&mut self, id: i32) {
        let Some(produto) = self.state.produtos.iter().find(|p| p.id == id) else {
            tracing::debug!(id, "edit requested for a product not in the list");
            return;
        };
        self.state.edit = state::EditForm {
            nome: produto.nome.clone(),
            quantidade: produto.quantidade.to_string(),
            preco: edit_preco(produto.preco),
        };
        self.state.invalid.remove(&Field::EditQuantidade);
        self.state.invalid.remove(&Field::EditPreco);
        self.state.mode = ViewMode::Editing { id };
        self.state.focus = Some(Field::EditNome);
    }

    async fn save_edit(&mut self) {
        let ViewMode::Editing { id } = self.state.mode else {
            return;
        };
        let edit = &self.state.edit;
        let input = match Self::read_input(&edit.nome, &edit.quantidade, &edit.preco) {
            Ok(input) => input,
            Err(toast) => return self.toast(toast),
        };

        match self.try_update(id, input).await {
            Ok(()) => self.reset_form().await,
            Err(Rejected::Outcome(message)) => self.toast(Toast::error(format!(
                "❌ Erro ao atualizar: {}",
                message.unwrap_or_default()
            ))),
            Err(Rejected::Bridge(err)) => {
                tracing::error!(id, error = %err, "update rejected");
                self.toast(Toast::error(MSG_UPDATE_FAILED));
            }
        }
    }

    async fn try_update(&mut self, id: i32, input: ProductInput) -> Result<(), Rejected> {
        let outcome = self.api.update_product(id, input).await?;
        if !outcome.success {
            return Err(Rejected::Outcome(outcome.message));
        }
        self.state.mode = ViewMode::Idle;
        self.toast(Toast::success(MSG_UPDATED));
        self.refresh().await?;
        Ok(())
    }

    fn request_delete(&mut self, id: i32) {
        if self.state.mode != ViewMode::Idle {
            tracing::debug!(id, mode = ?self.state.mode, "delete ignored while a modal is open");
            return;
        }
        self.state.pending_delete = Some(id);
        self.state.confirm_body = CONFIRM_DELETE.to_string();
        self.state.mode = ViewMode::ConfirmingDelete { id };
    }

    async fn confirm_delete(&mut self) {
        if !self.state.confirm_open() {
            return;
        }
        if let Some(id) = self.state.pending_delete {
            match self.try_delete(id).await {
                Ok(()) => {
                    self.reset_form().await;
                    self.toast(Toast::success(MSG_DELETED));
                }
                Err(Rejected::Outcome(message)) => self.toast(Toast::error(format!(
                    "❌ Erro ao excluir: {}",
                    message.unwrap_or_default()
                ))),
                Err(Rejected::Bridge(err)) => {
                    tracing::error!(id, error = %err, "delete rejected");
                    self.toast(Toast::error(MSG_DELETE_FAILED));
                }
            }
        }
        self.state.mode = ViewMode::Idle;
        self.state.pending_delete = None;
    }

    async fn try_delete(&mut self, id: i32) -> Result<(), Rejected> {
        let outcome = self.api.delete_product(id).await?;
        if !outcome.success {
            return Err(Rejected::Outcome(outcome.message));
        }
        self.refresh().await?;
        Ok(())
    }
}
