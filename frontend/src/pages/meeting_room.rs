use leptos::prelude::*;

const ROOMS: [(&str, &str); 3] = [
    ("Room A", "6 seats · display"),
    ("Room B", "4 seats"),
    ("Lounge", "12 seats · projector"),
];

#[component]
pub fn MeetingRoomPage() -> impl IntoView {
    view! {
        <div class="card bg-base-100 shadow">
            <div class="card-body">
                <h2 class="card-title">"Meeting rooms"</h2>
                <ul class="divide-y divide-base-300">
                    {ROOMS
                        .iter()
                        .map(|(name, detail)| view! {
                            <li class="flex justify-between py-2">
                                <span class="font-medium">{*name}</span>
                                <span class="text-sm opacity-60">{*detail}</span>
                            </li>
                        })
                        .collect_view()}
                </ul>
            </div>
        </div>
    }
}
