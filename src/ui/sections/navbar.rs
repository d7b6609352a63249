use leptos::prelude::*;

use crate::core::constants::NAV_LINKS;
use crate::ui::icon::{Icon, icons};

#[component]
pub fn Navbar() -> impl IntoView {
    view! {
        <header>
            <nav>
                <Icon name=icons::LOGO alt="Apple logo" />
                <ul>
                    {NAV_LINKS
                        .iter()
                        .map(|link| view! {
                            <li>
                                <a href=link.label>{link.label}</a>
                            </li>
                        })
                        .collect_view()}
                </ul>
                <div class="flex-center gap-3">
                    <button aria-label="Search">
                        <Icon name=icons::SEARCH alt="Search" />
                    </button>
                    <button aria-label="Cart">
                        <Icon name=icons::CART alt="Cart" />
                    </button>
                </div>
            </nav>
        </header>
    }
}
