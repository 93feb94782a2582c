use contracts::system::tecopos::{LinkSupplierRequest, LookupEntry};
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;

use crate::system::auth::context::{use_auth, AuthState};
use crate::system::tecopos::api;

/// Tecopos linkage: saved token per region plus the linked business/supplier
#[component]
pub fn TecoposSettingsPage() -> impl IntoView {
    let (auth_state, set_auth_state) = use_auth();

    let regions = RwSignal::new(Vec::<String>::new());
    let region = RwSignal::new(String::new());
    let token = RwSignal::new(String::new());
    let businesses = RwSignal::new(Vec::<LookupEntry>::new());
    let business_id = RwSignal::new(String::new());
    let supplier_query = RwSignal::new(String::new());
    let suppliers = RwSignal::new(Vec::<LookupEntry>::new());
    let selected_supplier = RwSignal::new(None::<LookupEntry>);
    let message = RwSignal::new(None::<String>);
    let error = RwSignal::new(None::<String>);
    let busy = RwSignal::new(false);

    Effect::new(move |_| {
        spawn_local(async move {
            match api::fetch_regions().await {
                Ok(list) => {
                    let current = auth_state
                        .get_untracked()
                        .user_info
                        .and_then(|u| u.tecopos)
                        .and_then(|t| t.region);
                    region.set(current.or_else(|| list.first().cloned()).unwrap_or_default());
                    regions.set(list);
                }
                Err(e) => log::error!("Failed to load Tecopos regions: {}", e),
            }
        });
    });

    let fail = move |what: &str, e: String| {
        log::error!("{}: {}", what, e);
        error.set(Some(format!("{}. Intente de nuevo.", what)));
        busy.set(false);
    };

    let start = move || {
        busy.set(true);
        error.set(None);
        message.set(None);
    };

    let save_token = move || {
        let value = token.get_untracked();
        if value.trim().is_empty() {
            error.set(Some("Pegue el token de acceso de Tecopos.".to_string()));
            return;
        }
        start();
        spawn_local(async move {
            match api::save_token(region.get_untracked(), value).await {
                Ok(_) => {
                    token.set(String::new());
                    message.set(Some("Token guardado.".to_string()));
                    busy.set(false);
                }
                Err(e) => fail("No se pudo guardar el token", e),
            }
        });
    };

    let load_businesses = move || {
        start();
        spawn_local(async move {
            match api::fetch_businesses(region.get_untracked()).await {
                Ok(list) => {
                    business_id.set(list.first().map(|b| b.id.clone()).unwrap_or_default());
                    businesses.set(list);
                    busy.set(false);
                }
                Err(e) => fail("No se pudieron cargar los negocios", e),
            }
        });
    };

    let search_suppliers = move || {
        if business_id.get_untracked().is_empty() {
            error.set(Some("Seleccione un negocio.".to_string()));
            return;
        }
        start();
        spawn_local(async move {
            let result = api::search_suppliers(
                region.get_untracked(),
                business_id.get_untracked(),
                supplier_query.get_untracked(),
            )
            .await;
            match result {
                Ok(list) => {
                    selected_supplier.set(None);
                    suppliers.set(list);
                    busy.set(false);
                }
                Err(e) => fail("No se pudieron buscar proveedores", e),
            }
        });
    };

    let link = move || {
        let Some(supplier) = selected_supplier.get_untracked() else {
            error.set(Some("Seleccione un proveedor.".to_string()));
            return;
        };
        let request = LinkSupplierRequest {
            region: region.get_untracked(),
            business_id: business_id.get_untracked(),
            supplier_id: supplier.id,
            supplier_name: Some(supplier.name).filter(|n| !n.is_empty()),
        };
        start();
        spawn_local(async move {
            match api::link_supplier(request).await {
                Ok(info) => {
                    if let Some(access_token) = auth_state.get_untracked().access_token {
                        set_auth_state.set(AuthState::authenticated(access_token, info));
                    }
                    message.set(Some("Proveedor vinculado.".to_string()));
                    busy.set(false);
                }
                Err(e) => fail("No se pudo vincular el proveedor", e),
            }
        });
    };

    let current_link = move || {
        auth_state
            .get()
            .user_info
            .and_then(|u| u.tecopos)
            .filter(|t| t.is_complete())
            .map(|t| {
                format!(
                    "{} / negocio {} / proveedor {}",
                    t.region.unwrap_or_default(),
                    t.business_id.unwrap_or_default(),
                    t.supplier_name.or(t.supplier_id).unwrap_or_default()
                )
            })
    };

    let disabled = Signal::derive(move || busy.get());

    view! {
        <div id="sys_tecopos--settings" class="page">
            <div class="page__header">
                <div class="page__header-left">
                    <h1 class="page__title">"Conexión con Tecopos"</h1>
                </div>
            </div>

            <div class="page__content">
                <p>
                    "Vinculación actual: "
                    <strong>{move || current_link().unwrap_or_else(|| "sin vincular (datos de ejemplo)".to_string())}</strong>
                </p>

                {move || error.get().map(|e| view! { <div class="alert alert--error">{e}</div> })}
                {move || message.get().map(|m| view! { <div class="alert alert--success">{m}</div> })}

                <h2 class="section__title">"1. Región y token"</h2>
                <Flex gap=FlexGap::Small align=FlexAlign::End>
                    <div class="form-group">
                        <label for="tecopos-region">"Región"</label>
                        <select
                            id="tecopos-region"
                            prop:value=move || region.get()
                            on:change=move |ev| {
                                region.set(event_target_value(&ev));
                                businesses.set(Vec::new());
                                suppliers.set(Vec::new());
                            }
                        >
                            <For
                                each=move || regions.get()
                                key=|r| r.clone()
                                children=move |r| {
                                    let value = r.clone();
                                    view! { <option value=value>{r}</option> }
                                }
                            />
                        </select>
                    </div>
                    <div class="form-group" style="flex: 1; max-width: 420px;">
                        <label>"Token de acceso"</label>
                        <Input value=token placeholder="Pegue aquí el token" />
                    </div>
                    <Button appearance=ButtonAppearance::Primary on_click=move |_| save_token() disabled=disabled>
                        "Guardar token"
                    </Button>
                </Flex>

                <h2 class="section__title">"2. Negocio"</h2>
                <Flex gap=FlexGap::Small align=FlexAlign::End>
                    <Button appearance=ButtonAppearance::Secondary on_click=move |_| load_businesses() disabled=disabled>
                        "Cargar negocios"
                    </Button>
                    <select
                        prop:value=move || business_id.get()
                        on:change=move |ev| business_id.set(event_target_value(&ev))
                    >
                        <For
                            each=move || businesses.get()
                            key=|b| b.id.clone()
                            children=move |b| {
                                view! { <option value=b.id.clone()>{format!("{} ({})", b.name, b.id)}</option> }
                            }
                        />
                    </select>
                </Flex>

                <h2 class="section__title">"3. Proveedor"</h2>
                <Flex gap=FlexGap::Small align=FlexAlign::End>
                    <div style="flex: 1; max-width: 320px;">
                        <Input value=supplier_query placeholder="Nombre del proveedor..." />
                    </div>
                    <Button appearance=ButtonAppearance::Secondary on_click=move |_| search_suppliers() disabled=disabled>
                        "Buscar"
                    </Button>
                </Flex>

                <Table attr:style="width: 100%;">
                    <TableHeader>
                        <TableRow>
                            <TableHeaderCell>"ID"</TableHeaderCell>
                            <TableHeaderCell>"Nombre"</TableHeaderCell>
                            <TableHeaderCell>""</TableHeaderCell>
                        </TableRow>
                    </TableHeader>
                    <TableBody>
                        <For
                            each=move || suppliers.get()
                            key=|s| s.id.clone()
                            children=move |s| {
                                let entry = s.clone();
                                let id = s.id.clone();
                                let is_selected = move || {
                                    selected_supplier.with(|sel| sel.as_ref().is_some_and(|e| e.id == id))
                                };
                                view! {
                                    <TableRow>
                                        <TableCell><TableCellLayout>{s.id.clone()}</TableCellLayout></TableCell>
                                        <TableCell><TableCellLayout truncate=true>{s.name.clone()}</TableCellLayout></TableCell>
                                        <TableCell>
                                            <TableCellLayout>
                                                <Button
                                                    appearance=ButtonAppearance::Subtle
                                                    on_click=move |_| selected_supplier.set(Some(entry.clone()))
                                                >
                                                    {move || if is_selected() { "Seleccionado" } else { "Seleccionar" }}
                                                </Button>
                                            </TableCellLayout>
                                        </TableCell>
                                    </TableRow>
                                }
                            }
                        />
                    </TableBody>
                </Table>

                <Button
                    appearance=ButtonAppearance::Primary
                    on_click=move |_| link()
                    disabled=Signal::derive(move || busy.get() || selected_supplier.with(|s| s.is_none()))
                >
                    "Vincular proveedor"
                </Button>
            </div>
        </div>
    }
}
