use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::models::Product;

pub const ADD_BUTTON_LABEL: &str = "Adicionar Produto";
pub const FILTER_PLACEHOLDER: &str = "Filtrar por nome...";

/// Input fields of the main form and of the edit modal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub enum Field {
    Nome,
    Quantidade,
    Preco,
    EditNome,
    EditQuantidade,
    EditPreco,
}

impl Field {
    /// Fields filtered on every keystroke.
    pub fn is_numeric(self) -> bool {
        matches!(
            self,
            Field::Quantidade | Field::Preco | Field::EditQuantidade | Field::EditPreco
        )
    }

    pub fn dom_id(self) -> &'static str {
        match self {
            Field::Nome => "produto-name",
            Field::Quantidade => "produto-quantidade",
            Field::Preco => "produto-preco",
            Field::EditNome => "edit-produto-nome",
            Field::EditQuantidade => "edit-produto-quantidade",
            Field::EditPreco => "edit-produto-preco",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(tag = "state", rename_all = "camelCase")]
pub enum ViewMode {
    Idle,
    Editing { id: i32 },
    ConfirmingDelete { id: i32 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub enum ButtonStyle {
    Success,
    Primary,
}

impl ButtonStyle {
    pub fn css_class(self) -> &'static str {
        match self {
            ButtonStyle::Success => "btn-success",
            ButtonStyle::Primary => "btn-primary",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct SubmitButton {
    pub label: String,
    pub style: ButtonStyle,
}

impl Default for SubmitButton {
    fn default() -> Self {
        Self {
            label: ADD_BUTTON_LABEL.to_string(),
            style: ButtonStyle::Success,
        }
    }
}

/// The main "add product" form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct FormState {
    pub id: Option<i32>,
    pub nome: String,
    pub quantidade: String,
    pub preco: String,
    pub disabled: bool,
    pub button: SubmitButton,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct EditForm {
    pub nome: String,
    pub quantidade: String,
    pub preco: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub enum ToastVariant {
    Success,
    Error,
}

impl ToastVariant {
    pub fn header_class(self) -> &'static str {
        match self {
            ToastVariant::Success => "bg-success text-white",
            ToastVariant::Error => "bg-danger text-white",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Toast {
    pub message: String,
    pub variant: ToastVariant,
}

impl Toast {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            variant: ToastVariant::Success,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            variant: ToastVariant::Error,
        }
    }
}

/// Everything the page shows. Replaced wholesale by the controller, never
/// merged.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct ViewState {
    pub mode: ViewMode,
    pub form: FormState,
    pub edit: EditForm,
    pub confirm_body: String,
    pub pending_delete: Option<i32>,
    pub produtos: Vec<Product>,
    #[schema(value_type = Vec<String>)]
    pub nomes: BTreeSet<String>,
    pub filtro: Option<String>,
    pub list_visible: bool,
    pub list_html: String,
    pub filter_html: String,
    #[schema(value_type = Vec<Field>)]
    pub invalid: BTreeSet<Field>,
    pub toast: Option<Toast>,
    pub focus: Option<Field>,
}

impl Default for ViewState {
    fn default() -> Self {
        Self {
            mode: ViewMode::Idle,
            form: FormState::default(),
            edit: EditForm::default(),
            confirm_body: String::new(),
            pending_delete: None,
            produtos: Vec::new(),
            nomes: BTreeSet::new(),
            filtro: None,
            list_visible: false,
            list_html: String::new(),
            filter_html: String::new(),
            invalid: BTreeSet::new(),
            toast: None,
            focus: Some(Field::Nome),
        }
    }
}

impl ViewState {
    pub fn edit_open(&self) -> bool {
        matches!(self.mode, ViewMode::Editing { .. })
    }

    pub fn confirm_open(&self) -> bool {
        matches!(self.mode, ViewMode::ConfirmingDelete { .. })
    }
}

/// User interactions the controller reacts to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum ViewEvent {
    Input { field: Field, value: String },
    Add,
    List,
    CloseList,
    Filter {
        #[serde(default)]
        nome: Option<String>,
    },
    Edit { id: i32 },
    Delete { id: i32 },
    ConfirmDelete,
    CancelDelete,
    SaveEdit,
    CloseEdit,
}
