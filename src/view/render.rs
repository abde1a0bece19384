//! HTML markup for the product list and the page shell.

use std::collections::BTreeSet;
use std::fmt::{Display, Write};

use chrono::TimeZone;

use crate::models::Product;

use super::{
    format::{format_preco, format_quantidade, format_timestamp},
    state::{FILTER_PLACEHOLDER, Field, ViewMode, ViewState},
};

pub const EMPTY_LIST: &str = "Nenhum produto cadastrado.";
pub const EMPTY_FILTER: &str = "Nenhum produto encontrado.";

pub fn escape_html(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

pub fn product_card<Tz>(produto: &Product, tz: &Tz) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    format!(
        r#"<div class="list-group-item d-flex justify-content-between align-items-center">
  <div>
    <h5 class="mb-1">{nome}</h5>
    <small class="text-muted">Adicionado em: {data} | Quantidade: {qtd} kg | Preço: R$ {preco}</small>
  </div>
  <div>
    <button class="btn btn-sm btn-warning btn-editar" data-id="{id}"><i class="bi bi-pencil"></i></button>
    <button class="btn btn-sm btn-danger btn-excluir" data-id="{id}"><i class="bi bi-trash"></i></button>
  </div>
</div>
"#,
        nome = escape_html(&produto.nome),
        data = format_timestamp(produto.data_criacao, tz),
        qtd = format_quantidade(produto.quantidade),
        preco = format_preco(produto.preco),
        id = produto.id,
    )
}

pub fn empty_message(message: &str) -> String {
    format!(r#"<p class="text-center text-muted">{message}</p>"#)
}

/// Full rebuild of the list container.
pub fn product_list<'a, Tz>(
    produtos: impl IntoIterator<Item = &'a Product>,
    tz: &Tz,
    when_empty: &str,
) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    let mut html = String::new();
    for produto in produtos {
        html.push_str(&product_card(produto, tz));
    }
    if html.is_empty() {
        empty_message(when_empty)
    } else {
        html
    }
}

pub fn filter_options(nomes: &BTreeSet<String>, selected: Option<&str>) -> String {
    let mut html = format!(r#"<option value="">{}</option>"#, FILTER_PLACEHOLDER);
    for nome in nomes {
        let nome_html = escape_html(nome);
        let marker = if selected == Some(nome.as_str()) {
            " selected"
        } else {
            ""
        };
        let _ = write!(html, r#"<option value="{nome_html}"{marker}>{nome_html}</option>"#);
    }
    html
}

fn input(field: Field, label: &str, value: &str, state: &ViewState, disabled: bool) -> String {
    let mut class = String::from("form-control");
    if state.invalid.contains(&field) {
        class.push_str(" is-invalid");
    }
    format!(
        r#"<label class="form-label" for="{id}">{label}</label><input id="{id}" class="{class}" value="{value}"{disabled}{autofocus}>"#,
        id = field.dom_id(),
        value = escape_html(value),
        disabled = if disabled { " disabled" } else { "" },
        autofocus = if state.focus == Some(field) { " autofocus" } else { "" },
    )
}

/// The whole page for the current state. Scripts and styles load from the
/// trusted CDN only.
pub fn page(state: &ViewState, script_cdn: &str) -> String {
    let form = &state.form;
    let mut html = String::new();
    let _ = write!(
        html,
        r#"<!DOCTYPE html>
<html lang="pt-BR">
<head>
<meta charset="utf-8">
<title>Estoque do Aviário</title>
<link rel="stylesheet" href="{cdn}/npm/bootstrap@5.3.3/dist/css/bootstrap.min.css">
<link rel="stylesheet" href="{cdn}/npm/bootstrap-icons@1.11.3/font/bootstrap-icons.min.css">
</head>
<body class="container py-4">
<input type="hidden" id="produto-id" value="{id}">
<div class="mb-3">{nome}</div>
<div class="mb-3">{quantidade}</div>
<div class="mb-3">{preco}</div>
<button id="btn-add" class="btn {button_class}"><i class="bi bi-plus-circle"></i> {button_label}</button>
<button id="btn-list" class="btn btn-secondary">Listar Produtos</button>
"#,
        cdn = script_cdn,
        id = form.id.map(|id| id.to_string()).unwrap_or_default(),
        nome = input(Field::Nome, "Nome", &form.nome, state, form.disabled),
        quantidade = input(Field::Quantidade, "Quantidade (kg)", &form.quantidade, state, form.disabled),
        preco = input(Field::Preco, "Preço (R$)", &form.preco, state, form.disabled),
        button_class = form.button.style.css_class(),
        button_label = escape_html(&form.button.label),
    );

    let _ = write!(
        html,
        r#"<section id="secao-lista-produtos" class="mt-4{hidden}">
<select id="filtro-produtos" class="form-select mb-2">{options}</select>
<button id="btn-fechar-lista" class="btn btn-sm btn-outline-secondary">Fechar</button>
<div id="lista-produtos" class="list-group">{list}</div>
</section>
"#,
        hidden = if state.list_visible { "" } else { " d-none" },
        options = state.filter_html,
        list = state.list_html,
    );

    let _ = write!(
        html,
        r#"<div id="editModal" class="modal{edit_show}">
<input type="hidden" id="edit-produto-id" value="{edit_id}">
<div class="mb-3">{edit_nome}</div>
<div class="mb-3">{edit_quantidade}</div>
<div class="mb-3">{edit_preco}</div>
<button id="btn-salvar-edicao" class="btn btn-primary">Salvar</button>
</div>
<div id="confirmModal" class="modal{confirm_show}">
<div id="confirmModalBody">{confirm_body}</div>
<button id="confirmYes" class="btn btn-danger">Sim</button>
<button id="confirmNo" class="btn btn-secondary">Não</button>
</div>
"#,
        edit_show = if state.edit_open() { " show d-block" } else { "" },
        edit_id = match state.mode {
            ViewMode::Editing { id } => id.to_string(),
            _ => String::new(),
        },
        edit_nome = input(Field::EditNome, "Nome", &state.edit.nome, state, false),
        edit_quantidade = input(Field::EditQuantidade, "Quantidade (kg)", &state.edit.quantidade, state, false),
        edit_preco = input(Field::EditPreco, "Preço (R$)", &state.edit.preco, state, false),
        confirm_show = if state.confirm_open() { " show d-block" } else { "" },
        confirm_body = escape_html(&state.confirm_body),
    );

    if let Some(toast) = &state.toast {
        let _ = write!(
            html,
            r#"<div id="feedback-toast" class="toast show"><div class="toast-header {header}">Aviário</div><div id="toast-body-content" class="toast-body">{message}</div></div>
"#,
            header = toast.variant.header_class(),
            message = escape_html(&toast.message),
        );
    }

    let _ = write!(
        html,
        r#"<script src="{script_cdn}/npm/bootstrap@5.3.3/dist/js/bootstrap.bundle.min.js"></script>
</body>
</html>
"#
    );
    html
}
