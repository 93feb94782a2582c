use contracts::dashboards::d400_sales_report::ReportForm;
use contracts::domain::a002_conciliation::Conciliation;
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;

use crate::dashboards::d400_sales_report::state::{ReportState, GENERIC_LOAD_ERROR};
use crate::domain::a001_sale::api as sales_api;
use crate::domain::a002_conciliation::api as conciliation_api;
use crate::projections::p900_inventory::api as inventory_api;
use crate::shared::components::date_input::DateInput;
use crate::shared::components::stat_card::{format_money, format_thousands, StatCard};
use crate::system::auth::context::use_auth;

/// Sales report: form, aggregate cards, product and stock tables, conciliations
#[component]
pub fn SalesReportDashboard() -> impl IntoView {
    let (auth_state, _) = use_auth();
    let default_supplier = auth_state
        .get_untracked()
        .user_info
        .map(|u| u.supplier_id_tecopos.to_string())
        .unwrap_or_default();

    let date_from = RwSignal::new(String::new());
    let date_to = RwSignal::new(String::new());
    let supplier_id = RwSignal::new(default_supplier);

    let state = RwSignal::new(ReportState::default());
    let conciliations = RwSignal::new(Vec::<Conciliation>::new());
    let conciliation_error = RwSignal::new(None::<String>);
    let saving = RwSignal::new(false);

    let load_conciliations = move || {
        spawn_local(async move {
            match conciliation_api::fetch_conciliations().await {
                Ok(items) => conciliations.set(items),
                Err(e) => {
                    log::error!("Failed to load conciliations: {}", e);
                    conciliation_error.set(Some(GENERIC_LOAD_ERROR.to_string()));
                }
            }
        });
    };

    Effect::new(move |_| load_conciliations());

    let submit = move || {
        let form = ReportForm {
            date_from: date_from.get_untracked(),
            date_to: date_to.get_untracked(),
            supplier_id: supplier_id.get_untracked(),
        };
        let query = match form.validate() {
            Ok(query) => query,
            Err(e) => {
                state.update(|s| s.reject(&e));
                return;
            }
        };

        let mut seq = 0;
        state.update(|s| seq = s.begin());

        spawn_local(async move {
            let result = async {
                let report = sales_api::fetch_sales(&query).await?;
                let inventory = inventory_api::fetch_inventory().await?;
                Ok::<_, String>((report, inventory))
            }
            .await;

            match result {
                Ok((report, inventory)) => state.update(|s| {
                    if !s.apply_success(seq, report, inventory) {
                        log::debug!("Dropped stale report #{}", seq);
                    }
                }),
                Err(e) => {
                    log::error!("Report request #{} failed: {}", seq, e);
                    state.update(|s| {
                        s.apply_failure(seq);
                    });
                }
            }
        });
    };

    let save_conciliation = move || {
        let Some(sale_id) = state.with_untracked(|s| s.sale_id()) else {
            return;
        };
        saving.set(true);
        conciliation_error.set(None);
        spawn_local(async move {
            match conciliation_api::create_conciliation(sale_id).await {
                Ok(conciliation) => {
                    log::info!("Conciliation {} saved", conciliation.id);
                    load_conciliations();
                }
                Err(e) => {
                    log::error!("Failed to save conciliation: {}", e);
                    conciliation_error.set(Some(
                        "No se pudo guardar la conciliación. Intente de nuevo.".to_string(),
                    ));
                }
            }
            saving.set(false);
        });
    };

    let loading = Signal::derive(move || state.with(|s| s.loading));
    let summary = Memo::new(move |_| state.with(|s| s.summary()));
    let products = move || state.with(|s| s.product_rows());
    let inventory = move || state.with(|s| s.inventory_rows());

    view! {
        <div id="d400_sales_report--dashboard" class="page">
            <div class="page__header">
                <div class="page__header-left">
                    <h1 class="page__title">"Reporte de ventas"</h1>
                </div>
            </div>

            <div class="page__content">
                <div class="filter-panel">
                    <div class="filter-panel-content">
                        <Flex gap=FlexGap::Small align=FlexAlign::End>
                            <div class="form-group">
                                <label for="date-from">"Desde"</label>
                                <DateInput value=date_from id="date-from" disabled=loading />
                            </div>
                            <div class="form-group">
                                <label for="date-to">"Hasta"</label>
                                <DateInput value=date_to id="date-to" disabled=loading />
                            </div>
                            <div class="form-group" style="max-width: 160px;">
                                <label>"ID de proveedor"</label>
                                <Input value=supplier_id placeholder="Ej. 1024" />
                            </div>
                            <Button
                                appearance=ButtonAppearance::Primary
                                on_click=move |_| submit()
                                disabled=loading
                            >
                                {move || if loading.get() { "Cargando..." } else { "Consultar" }}
                            </Button>
                        </Flex>
                    </div>
                </div>

                {move || state.with(|s| s.error.clone()).map(|e| view! {
                    <div class="alert alert--error">{e}</div>
                })}

                <div class="stat-cards">
                    <StatCard
                        label="Productos"
                        value=Signal::derive(move || summary.get().map(|s| s.row_count.to_string()))
                    />
                    <StatCard
                        label="Unidades vendidas"
                        value=Signal::derive(move || {
                            summary.get().map(|s| format_thousands(s.total_units.max(0) as u64))
                        })
                    />
                    <StatCard
                        label="Ingresos"
                        value=Signal::derive(move || summary.get().map(|s| format_money(s.total_revenue)))
                    />
                    <StatCard
                        label="Precio promedio"
                        value=Signal::derive(move || summary.get().map(|s| s.average_price))
                        subtitle=Signal::derive(|| Some("por unidad".to_string()))
                    />
                </div>

                <h2 class="section__title">"Productos vendidos"</h2>
                <Show
                    when=move || state.with(|s| s.report.is_some())
                    fallback=|| view! { <div class="empty-state">"Consulte un rango de fechas para ver las ventas."</div> }
                >
                    <Table attr:style="width: 100%;">
                        <TableHeader>
                            <TableRow>
                                <TableHeaderCell>"Producto"</TableHeaderCell>
                                <TableHeaderCell>"Vendidas"</TableHeaderCell>
                                <TableHeaderCell>"Cantidad total"</TableHeaderCell>
                                <TableHeaderCell>"Importe"</TableHeaderCell>
                            </TableRow>
                        </TableHeader>
                        <TableBody>
                            <For
                                each=products
                                key=|(tag, p)| (*tag, p.product_id)
                                children=move |(_, p)| {
                                    let name = p.name.clone();
                                    let revenue = format_money(p.revenue());
                                    view! {
                                        <TableRow>
                                            <TableCell>
                                                <TableCellLayout truncate=true>{name}</TableCellLayout>
                                            </TableCell>
                                            <TableCell>
                                                <TableCellLayout>{p.quantity_sales}</TableCellLayout>
                                            </TableCell>
                                            <TableCell>
                                                <TableCellLayout>{p.total_quantity}</TableCellLayout>
                                            </TableCell>
                                            <TableCell>
                                                <TableCellLayout>{revenue}</TableCellLayout>
                                            </TableCell>
                                        </TableRow>
                                    }
                                }
                            />
                        </TableBody>
                    </Table>
                </Show>

                <h2 class="section__title">"Inventario"</h2>
                <Show
                    when=move || state.with(|s| !s.inventory.is_empty())
                    fallback=|| view! { <div class="empty-state">"Sin datos de inventario."</div> }
                >
                    <Table attr:style="width: 100%;">
                        <TableHeader>
                            <TableRow>
                                <TableHeaderCell>"ID"</TableHeaderCell>
                                <TableHeaderCell>"Producto"</TableHeaderCell>
                                <TableHeaderCell>"Existencia"</TableHeaderCell>
                            </TableRow>
                        </TableHeader>
                        <TableBody>
                            <For
                                each=inventory
                                key=|(tag, item)| (*tag, item.product_id)
                                children=move |(_, item)| {
                                    view! {
                                        <TableRow>
                                            <TableCell>
                                                <TableCellLayout>{item.product_id}</TableCellLayout>
                                            </TableCell>
                                            <TableCell>
                                                <TableCellLayout truncate=true>{item.name.clone()}</TableCellLayout>
                                            </TableCell>
                                            <TableCell>
                                                <TableCellLayout>{item.total_quantity}</TableCellLayout>
                                            </TableCell>
                                        </TableRow>
                                    }
                                }
                            />
                        </TableBody>
                    </Table>
                </Show>

                <div class="page__header">
                    <div class="page__header-left">
                        <h2 class="section__title">"Conciliaciones"</h2>
                        <Badge>{move || conciliations.with(|c| c.len()).to_string()}</Badge>
                    </div>
                    <div class="page__header-right">
                        <Button
                            appearance=ButtonAppearance::Primary
                            on_click=move |_| save_conciliation()
                            disabled=Signal::derive(move || {
                                saving.get() || state.with(|s| s.report.is_none())
                            })
                        >
                            {move || if saving.get() { "Guardando..." } else { "Guardar conciliación" }}
                        </Button>
                    </div>
                </div>

                {move || conciliation_error.get().map(|e| view! {
                    <div class="alert alert--error">{e}</div>
                })}

                <Table attr:style="width: 100%;">
                    <TableHeader>
                        <TableRow>
                            <TableHeaderCell>"Rango"</TableHeaderCell>
                            <TableHeaderCell>"Pedidos"</TableHeaderCell>
                            <TableHeaderCell>"Unidades"</TableHeaderCell>
                            <TableHeaderCell>"Ingresos"</TableHeaderCell>
                            <TableHeaderCell>"Descuentos"</TableHeaderCell>
                            <TableHeaderCell>"Total"</TableHeaderCell>
                        </TableRow>
                    </TableHeader>
                    <TableBody>
                        <For
                            each=move || conciliations.get()
                            key=|c| c.id.clone()
                            children=move |c| {
                                view! {
                                    <TableRow>
                                        <TableCell>
                                            <TableCellLayout>{c.range_label.clone()}</TableCellLayout>
                                        </TableCell>
                                        <TableCell>
                                            <TableCellLayout>{c.orders}</TableCellLayout>
                                        </TableCell>
                                        <TableCell>
                                            <TableCellLayout>{c.sales_qty}</TableCellLayout>
                                        </TableCell>
                                        <TableCell>
                                            <TableCellLayout>{format_money(c.revenue)}</TableCellLayout>
                                        </TableCell>
                                        <TableCell>
                                            <TableCellLayout>{format_money(c.discounts)}</TableCellLayout>
                                        </TableCell>
                                        <TableCell>
                                            <TableCellLayout>{format_money(c.total)}</TableCellLayout>
                                        </TableCell>
                                    </TableRow>
                                }
                            }
                        />
                    </TableBody>
                </Table>
            </div>
        </div>
    }
}
