use contracts::system::auth::RegisterRequest;
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::system::auth::api;

/// Turn the raw form into a request, or the message to show
pub fn build_register_request(
    email: &str,
    name: &str,
    supplier_id: &str,
    password: &str,
) -> Result<RegisterRequest, String> {
    let email = email.trim();
    let name = name.trim();
    if email.is_empty() || name.is_empty() {
        return Err("Indique el correo y el nombre.".to_string());
    }
    let supplier_id_tecopos = supplier_id
        .trim()
        .parse::<i64>()
        .map_err(|_| "El ID de proveedor debe ser numérico.".to_string())?;
    if password.chars().count() < 6 {
        return Err("La contraseña debe tener al menos 6 caracteres.".to_string());
    }

    Ok(RegisterRequest {
        email: email.to_string(),
        name: name.to_string(),
        supplier_id_tecopos,
        password: password.to_string(),
    })
}

#[component]
pub fn RegisterPage(
    /// Back to the login form
    on_login: Callback<()>,
) -> impl IntoView {
    let (email, set_email) = signal(String::new());
    let (name, set_name) = signal(String::new());
    let (supplier_id, set_supplier_id) = signal(String::new());
    let (password, set_password) = signal(String::new());
    let (error_message, set_error_message) = signal(Option::<String>::None);
    let (done, set_done) = signal(false);
    let (is_loading, set_is_loading) = signal(false);

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        set_error_message.set(None);

        let request = match build_register_request(
            &email.get(),
            &name.get(),
            &supplier_id.get(),
            &password.get(),
        ) {
            Ok(r) => r,
            Err(msg) => {
                set_error_message.set(Some(msg));
                return;
            }
        };

        set_is_loading.set(true);
        spawn_local(async move {
            match api::register(request).await {
                Ok(supplier) => {
                    log::info!("Registered supplier {}", supplier.email);
                    set_done.set(true);
                }
                Err(e) => {
                    log::error!("Registration failed: {}", e);
                    set_error_message.set(Some(
                        "No se pudo crear la cuenta. Revise los datos e intente de nuevo."
                            .to_string(),
                    ));
                }
            }
            set_is_loading.set(false);
        });
    };

    view! {
        <div class="login-container">
            <div class="login-box">
                <h1>"Portal de Proveedores"</h1>
                <h2>"Crear cuenta"</h2>

                <Show when=move || error_message.get().is_some()>
                    <div class="error-message">
                        {move || error_message.get().unwrap_or_default()}
                    </div>
                </Show>

                <Show
                    when=move || !done.get()
                    fallback=move || view! {
                        <div class="login-info">
                            <p>"Cuenta creada. Ya puede iniciar sesión."</p>
                            <button class="btn-primary" on:click=move |_| on_login.run(())>
                                "Ir a iniciar sesión"
                            </button>
                        </div>
                    }
                >
                    <form on:submit=on_submit>
                        <div class="form-group">
                            <label for="reg-email">"Correo"</label>
                            <input
                                type="email"
                                id="reg-email"
                                value=move || email.get()
                                on:input=move |ev| set_email.set(event_target_value(&ev))
                                disabled=move || is_loading.get()
                            />
                        </div>
                        <div class="form-group">
                            <label for="reg-name">"Nombre"</label>
                            <input
                                type="text"
                                id="reg-name"
                                value=move || name.get()
                                on:input=move |ev| set_name.set(event_target_value(&ev))
                                disabled=move || is_loading.get()
                            />
                        </div>
                        <div class="form-group">
                            <label for="reg-supplier">"ID de proveedor en Tecopos"</label>
                            <input
                                type="text"
                                id="reg-supplier"
                                inputmode="numeric"
                                value=move || supplier_id.get()
                                on:input=move |ev| set_supplier_id.set(event_target_value(&ev))
                                disabled=move || is_loading.get()
                            />
                        </div>
                        <div class="form-group">
                            <label for="reg-password">"Contraseña"</label>
                            <input
                                type="password"
                                id="reg-password"
                                value=move || password.get()
                                on:input=move |ev| set_password.set(event_target_value(&ev))
                                disabled=move || is_loading.get()
                            />
                        </div>

                        <button
                            type="submit"
                            class="btn-primary"
                            disabled=move || is_loading.get()
                        >
                            {move || if is_loading.get() { "Creando..." } else { "Crear cuenta" }}
                        </button>
                    </form>

                    <div class="login-info">
                        <p>"¿Ya tiene cuenta? "
                            <a href="#" on:click=move |ev| {
                                ev.prevent_default();
                                on_login.run(());
                            }>"Inicie sesión"</a>
                        </p>
                    </div>
                </Show>
            </div>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_form_builds_request() {
        let request = build_register_request(" ana@tienda.cu ", "Ana", " 42 ", "secreto").unwrap();
        assert_eq!(request.email, "ana@tienda.cu");
        assert_eq!(request.supplier_id_tecopos, 42);
    }

    #[test]
    fn short_password_is_rejected() {
        assert!(build_register_request("a@b.cu", "Ana", "42", "12345").is_err());
    }

    #[test]
    fn supplier_id_must_be_numeric() {
        assert!(build_register_request("a@b.cu", "Ana", "x42", "secreto").is_err());
    }
}
