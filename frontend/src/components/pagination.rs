use leptos::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageMove {
    First,
    Previous,
    Next,
    Last,
}

/// Zero-based page reached by `step` from `current`. Moves past either end
/// leave the page unchanged. With an unknown total, `Next` is always allowed
/// and `Last` does nothing.
pub fn step_page(current: u32, total_pages: Option<u32>, step: PageMove) -> u32 {
    match step {
        PageMove::First => 0,
        PageMove::Previous => current.saturating_sub(1),
        PageMove::Next => match total_pages {
            Some(total) if current.saturating_add(1) >= total => current,
            _ => current.saturating_add(1),
        },
        PageMove::Last => match total_pages {
            Some(total) if total > 0 => total - 1,
            _ => current,
        },
    }
}

pub fn can_step(current: u32, total_pages: Option<u32>, step: PageMove) -> bool {
    step_page(current, total_pages, step) != current
}

/// "Trang 2 / 5", or just "Trang 2" while the total is unknown.
pub fn pager_label(current: u32, total_pages: Option<u32>) -> String {
    match total_pages {
        Some(total) if total > 0 => format!("Trang {} / {}", u64::from(current) + 1, total),
        _ => format!("Trang {}", u64::from(current) + 1),
    }
}

#[component]
pub fn Pager(
    page: Signal<u32>,
    total_pages: Signal<Option<u32>>,
    on_move: Callback<PageMove>,
    #[prop(optional, into)] disabled: MaybeSignal<bool>,
) -> impl IntoView {
    let disabled = Signal::derive(move || disabled.get());
    let button = move |step: PageMove, label: &'static str, aria: &'static str| {
        view! {
            <button
                type="button"
                aria-label=aria
                class="px-3 py-1 rounded border border-border text-sm disabled:opacity-40"
                disabled=move || disabled.get() || !can_step(page.get(), total_pages.get(), step)
                on:click=move |_| on_move.call(step)
            >
                {label}
            </button>
        }
    };

    view! {
        <div class="flex items-center justify-end gap-2 py-3">
            {button(PageMove::First, "«", "Trang đầu")}
            {button(PageMove::Previous, "‹", "Trang trước")}
            <span class="text-sm text-fg-muted">
                {move || pager_label(page.get(), total_pages.get())}
            </span>
            {button(PageMove::Next, "›", "Trang sau")}
            {button(PageMove::Last, "»", "Trang cuối")}
        </div>
    }
}


#[cfg(all(test, not(target_arch = "wasm32")))]
mod host_tests {
    use super::*;
    use crate::test_support::ssr::render_to_string;

    #[test]
    fn pager_renders_label_and_controls() {
        let html = render_to_string(move || {
            view! {
                <Pager
                    page=Signal::derive(|| 1)
                    total_pages=Signal::derive(|| Some(4))
                    on_move=Callback::new(|_| {})
                />
            }
        });
        assert!(html.contains("Trang 2 / 4"));
        assert!(html.contains("Trang đầu"));
        assert!(html.contains("Trang cuối"));
    }
}
