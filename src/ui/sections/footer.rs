use leptos::prelude::*;

use crate::core::constants::FOOTER_LINKS;
use crate::ui::icon::{Icon, icons};

#[component]
pub fn Footer() -> impl IntoView {
    view! {
        <footer>
            <div class="info">
                <p>
                    "More ways to shop: "
                    <span>"Find an Apple Store"</span>
                    " or "
                    <span>"other retailer"</span>
                    " near you. Or call 000800 040 1966."
                </p>
                <Icon name=icons::LOGO />
            </div>
            <hr />
            <div class="links">
                <p>"Copyright © 2024 Apple Inc. All rights reserved."</p>
                <ul>
                    {FOOTER_LINKS
                        .iter()
                        .map(|link| view! {
                            <li>
                                <a href=link.link>{link.label}</a>
                            </li>
                        })
                        .collect_view()}
                </ul>
            </div>
        </footer>
    }
}
