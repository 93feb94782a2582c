use crate::dashboards::d400_sales_report::ui::dashboard::SalesReportDashboard;
use crate::system::auth::context::{do_logout, use_auth, AuthPhase};
use crate::system::pages::login::LoginPage;
use crate::system::pages::register::RegisterPage;
use crate::system::tecopos::ui::TecoposSettingsPage;
use leptos::prelude::*;
use thaw::*;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Page {
    Report,
    Tecopos,
}

#[component]
fn MainLayout() -> impl IntoView {
    let (auth_state, set_auth_state) = use_auth();
    let page = RwSignal::new(Page::Report);

    let user_name = move || {
        auth_state
            .get()
            .user_info
            .map(|u| u.name)
            .unwrap_or_default()
    };
    let tab_class = move |target: Page| {
        move || {
            if page.get() == target {
                "top-nav__item top-nav__item--active"
            } else {
                "top-nav__item"
            }
        }
    };

    view! {
        <div class="app-shell">
            <header class="top-nav">
                <span class="top-nav__brand">"Portal de Proveedores"</span>
                <a href="#" class=tab_class(Page::Report) on:click=move |ev| {
                    ev.prevent_default();
                    page.set(Page::Report);
                }>"Reporte"</a>
                <a href="#" class=tab_class(Page::Tecopos) on:click=move |ev| {
                    ev.prevent_default();
                    page.set(Page::Tecopos);
                }>"Tecopos"</a>
                <span class="top-nav__spacer"></span>
                <span class="top-nav__user">{user_name}</span>
                <Button
                    appearance=ButtonAppearance::Secondary
                    on_click=move |_| do_logout(set_auth_state)
                >
                    "Cerrar sesión"
                </Button>
            </header>
            <main class="app-shell__content">
                {move || match page.get() {
                    Page::Report => view! { <SalesReportDashboard /> }.into_any(),
                    Page::Tecopos => view! { <TecoposSettingsPage /> }.into_any(),
                }}
            </main>
        </div>
    }
}

#[component]
fn AuthPages() -> impl IntoView {
    let (show_register, set_show_register) = signal(false);

    view! {
        <Show
            when=move || show_register.get()
            fallback=move || view! {
                <LoginPage on_register=Callback::new(move |_| set_show_register.set(true)) />
            }
        >
            <RegisterPage on_login=Callback::new(move |_| set_show_register.set(false)) />
        </Show>
    }
}

#[component]
pub fn AppRoutes() -> impl IntoView {
    let (auth_state, _) = use_auth();

    move || match auth_state.with(|s| s.phase) {
        AuthPhase::Checking => view! {
            <div class="login-container">
                <span>"Verificando sesión..."</span>
            </div>
        }
        .into_any(),
        AuthPhase::Anonymous => view! { <AuthPages /> }.into_any(),
        AuthPhase::Authenticated => view! { <MainLayout /> }.into_any(),
    }
}
