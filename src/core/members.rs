//! Alliance member table: named sort keys and the sort/paginate session view.
//!
//! Sort keys are an enum with one accessor per variant, so an unsupported key cannot be
//! requested at all. The table's render state is `(key, direction, page)`; every update
//! re-sorts the in-memory member list and reflows the visible page into embed fields.

use crate::{
    api::models::Member,
    core::{
        format::{format_date, format_decimal, format_number},
        reflow::reflow,
        render::{
            Button, ButtonTone, ControlRow, EmbedView, FIELD_VALUE_LIMIT, MAX_EMBED_FIELDS,
            Rendered, SelectMenu, SelectOption,
        },
        session::{ComponentEvent, SessionView, Transition},
    },
    errors::{Error, Result},
};
use async_trait::async_trait;
use std::cmp::Ordering;

/// Members shown per page.
pub const PAGE_SIZE: usize = 20;

/// `custom_id` of the sort key select menu.
pub const SORT_SELECT_ID: &str = "members:sort";
/// `custom_id` of the direction toggle.
pub const DIRECTION_ID: &str = "members:direction";
/// `custom_id` of the previous page button.
pub const PREV_ID: &str = "members:prev";
/// `custom_id` of the next page button.
pub const NEXT_ID: &str = "members:next";

/// Field a member list can be ordered by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, poise::ChoiceParameter)]
pub enum MemberSortKey {
    /// Lifetime contribution
    #[name = "Contributed"]
    Contributed,
    /// Contribution today
    #[name = "Daily contribution"]
    DailyContribution,
    /// Flights flown
    #[name = "Flights"]
    Flights,
    /// Share value
    #[name = "Share value"]
    ShareValue,
    /// Join date
    #[name = "Joined"]
    Joined,
    /// Season contribution
    #[name = "Season"]
    Season,
    /// Airline name
    #[name = "Name"]
    Name,
}

/// Sort order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, poise::ChoiceParameter)]
pub enum SortDirection {
    /// Smallest first
    #[name = "Ascending"]
    Ascending,
    /// Largest first
    #[name = "Descending"]
    Descending,
}

impl SortDirection {
    /// The other direction.
    #[must_use]
    pub const fn toggled(self) -> Self {
        match self {
            Self::Ascending => Self::Descending,
            Self::Descending => Self::Ascending,
        }
    }

    const fn apply(self, ordering: Ordering) -> Ordering {
        match self {
            Self::Ascending => ordering,
            Self::Descending => ordering.reverse(),
        }
    }
}

impl MemberSortKey {
    /// Every key, in menu order.
    pub const ALL: [Self; 7] = [
        Self::Contributed,
        Self::DailyContribution,
        Self::Flights,
        Self::ShareValue,
        Self::Joined,
        Self::Season,
        Self::Name,
    ];

    /// Stable identifier used as the select menu value.
    #[must_use]
    pub const fn id(self) -> &'static str {
        match self {
            Self::Contributed => "contributed",
            Self::DailyContribution => "daily",
            Self::Flights => "flights",
            Self::ShareValue => "sv",
            Self::Joined => "joined",
            Self::Season => "season",
            Self::Name => "name",
        }
    }

    /// Human-readable label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Contributed => "Contributed",
            Self::DailyContribution => "Daily contribution",
            Self::Flights => "Flights",
            Self::ShareValue => "Share value",
            Self::Joined => "Joined",
            Self::Season => "Season",
            Self::Name => "Name",
        }
    }

    /// Looks a key up by [`Self::id`].
    #[must_use]
    pub fn from_id(id: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|key| key.id() == id)
    }

    /// Natural direction when the key is first picked.
    #[must_use]
    pub const fn default_direction(self) -> SortDirection {
        match self {
            Self::Name | Self::Joined => SortDirection::Ascending,
            _ => SortDirection::Descending,
        }
    }

    /// Ascending comparison of two members by this key.
    #[must_use]
    pub fn compare(self, a: &Member, b: &Member) -> Ordering {
        match self {
            Self::Contributed => a.contributed.cmp(&b.contributed),
            Self::DailyContribution => a.daily_contribution.cmp(&b.daily_contribution),
            Self::Flights => a.flights.cmp(&b.flights),
            Self::ShareValue => a.share_value.total_cmp(&b.share_value),
            Self::Joined => a.joined.cmp(&b.joined),
            Self::Season => a.season.cmp(&b.season),
            Self::Name => a.company.to_lowercase().cmp(&b.company.to_lowercase()),
        }
    }

    /// The member's value for this key, formatted for display.
    #[must_use]
    pub fn display_value(self, member: &Member) -> String {
        match self {
            Self::Contributed | Self::Name => format!("${}", format_number(member.contributed)),
            Self::DailyContribution => {
                format!("${} today", format_number(member.daily_contribution))
            }
            Self::Flights => format!("{} flights", format_number(i64::from(member.flights))),
            Self::ShareValue => format!("SV ${}", format_decimal(member.share_value)),
            Self::Joined => format!("joined {}", format_date(member.joined)),
            Self::Season => format!("${} this season", format_number(member.season)),
        }
    }
}

/// Sorts `members` by `key` in `direction`; ties fall back to the airline name.
pub fn sort_members(members: &mut [&Member], key: MemberSortKey, direction: SortDirection) {
    members.sort_by(|a, b| {
        direction
            .apply(key.compare(a, b))
            .then_with(|| MemberSortKey::Name.compare(a, b))
    });
}

/// Render state of a [`MemberTable`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortState {
    /// Active sort key
    pub key: MemberSortKey,
    /// Active direction
    pub direction: SortDirection,
    /// Zero-based page
    pub page: usize,
}

impl SortState {
    /// First page for `key`, in `direction` or the key's natural direction.
    #[must_use]
    pub fn new(key: MemberSortKey, direction: Option<SortDirection>) -> Self {
        Self {
            key,
            direction: direction.unwrap_or_else(|| key.default_direction()),
            page: 0,
        }
    }
}

/// Sortable, paginated member list of one alliance.
pub struct MemberTable {
    alliance: String,
    members: Vec<Member>,
}

impl MemberTable {
    /// Builds a table over an alliance's members.
    pub fn new(alliance: impl Into<String>, members: Vec<Member>) -> Self {
        Self {
            alliance: alliance.into(),
            members,
        }
    }

    /// Number of pages (at least one).
    #[must_use]
    pub fn page_count(&self) -> usize {
        self.members.len().div_ceil(PAGE_SIZE).max(1)
    }

    /// Display lines of the page described by `state`.
    #[must_use]
    pub fn page_lines(&self, state: &SortState) -> Vec<String> {
        let mut sorted: Vec<&Member> = self.members.iter().collect();
        sort_members(&mut sorted, state.key, state.direction);

        let start = state.page * PAGE_SIZE;
        sorted
            .iter()
            .enumerate()
            .skip(start)
            .take(PAGE_SIZE)
            .map(|(rank, member)| {
                format!(
                    "`{:>3}` **{}** · {}",
                    rank + 1,
                    member.company,
                    state.key.display_value(member)
                )
            })
            .collect()
    }

    fn controls(&self, state: &SortState) -> Vec<ControlRow> {
        let options = MemberSortKey::ALL
            .into_iter()
            .map(|key| SelectOption {
                label: key.label().to_string(),
                value: key.id().to_string(),
                description: None,
                selected: key == state.key,
            })
            .collect();

        let direction_label = match state.direction {
            SortDirection::Ascending => "▲ Ascending",
            SortDirection::Descending => "▼ Descending",
        };
        let last_page = self.page_count() - 1;

        vec![
            ControlRow::Select(SelectMenu {
                custom_id: SORT_SELECT_ID.to_string(),
                placeholder: "Sort by".to_string(),
                options,
                disabled: false,
            }),
            ControlRow::Buttons(vec![
                Button::new(PREV_ID, "◀ Previous").disabled(state.page == 0),
                Button::new(DIRECTION_ID, direction_label).tone(ButtonTone::Primary),
                Button::new(NEXT_ID, "Next ▶").disabled(state.page >= last_page),
            ]),
        ]
    }
}

#[async_trait]
impl SessionView for MemberTable {
    type State = SortState;

    fn render(&self, state: &SortState) -> Rendered {
        let lines = self.page_lines(state);
        let mut embed = EmbedView::new(format!("{} · Members", self.alliance)).footer(format!(
            "Page {}/{} · {} members",
            state.page + 1,
            self.page_count(),
            self.members.len()
        ));

        if lines.is_empty() {
            embed = embed.description("This alliance has no members.");
        }

        let heading = format!(
            "Sorted by {} ({})",
            state.key.label(),
            match state.direction {
                SortDirection::Ascending => "ascending",
                SortDirection::Descending => "descending",
            }
        );
        for (i, group) in reflow(&lines, FIELD_VALUE_LIMIT)
            .into_iter()
            .take(MAX_EMBED_FIELDS)
            .enumerate()
        {
            let name = if i == 0 { heading.clone() } else { "\u{200b}".to_string() };
            embed = embed.field(name, group, false);
        }

        Rendered {
            content: None,
            embed: Some(embed),
            rows: self.controls(state),
        }
    }

    async fn update(
        &self,
        event: &ComponentEvent,
        state: &SortState,
    ) -> Result<Transition<SortState>> {
        let next = match event.custom_id.as_str() {
            SORT_SELECT_ID => {
                let id = event
                    .first_value()
                    .ok_or_else(|| Error::user("No sort key was selected."))?;
                let key = MemberSortKey::from_id(id)
                    .ok_or_else(|| Error::user(format!("Cannot sort by `{id}`.")))?;
                SortState::new(key, None)
            }
            DIRECTION_ID => SortState {
                direction: state.direction.toggled(),
                page: 0,
                ..*state
            },
            PREV_ID => {
                if state.page == 0 {
                    return Err(Error::user("You are already on the first page."));
                }
                SortState {
                    page: state.page - 1,
                    ..*state
                }
            }
            NEXT_ID => {
                if state.page + 1 >= self.page_count() {
                    return Err(Error::user("You are already on the last page."));
                }
                SortState {
                    page: state.page + 1,
                    ..*state
                }
            }
            other => {
                return Err(Error::user(format!("Unknown control `{other}`.")));
            }
        };
        Ok(Transition::Continue(next))
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::test_utils::member;

    fn table(count: usize) -> MemberTable {
        let members = (0..count)
            .map(|i| {
                let i = i64::try_from(i).unwrap();
                member(i, &format!("Airline {i:02}"), 1_000 * i, 10 * (count as i64 - i))
            })
            .collect();
        MemberTable::new("Star Alliance", members)
    }

    async fn apply(
        table: &MemberTable,
        state: &SortState,
        event: ComponentEvent,
    ) -> Result<SortState> {
        match table.update(&event, state).await? {
            Transition::Continue(next) | Transition::Finish(next) => Ok(next),
        }
    }

    #[test]
    fn test_sort_by_each_key_descending_and_ascending() {
        let a = member(1, "alpha", 500, 10);
        let mut b = member(2, "Bravo", 900, 5);
        b.share_value = 1.5;
        b.flights = 3;
        let mut members = vec![&a, &b];

        sort_members(&mut members, MemberSortKey::Contributed, SortDirection::Descending);
        assert_eq!(members[0].company, "Bravo");

        sort_members(&mut members, MemberSortKey::DailyContribution, SortDirection::Descending);
        assert_eq!(members[0].company, "alpha");

        sort_members(&mut members, MemberSortKey::ShareValue, SortDirection::Ascending);
        assert_eq!(members[0].company, "Bravo");

        sort_members(&mut members, MemberSortKey::Name, SortDirection::Ascending);
        assert_eq!(members[0].company, "alpha");
    }

    #[test]
    fn test_ties_are_broken_by_name() {
        let a = member(1, "Zulu", 100, 0);
        let b = member(2, "Echo", 100, 0);
        let mut members = vec![&a, &b];
        sort_members(&mut members, MemberSortKey::Contributed, SortDirection::Descending);
        assert_eq!(members[0].company, "Echo");
    }

    #[test]
    fn test_sort_key_ids_round_trip() {
        for key in MemberSortKey::ALL {
            assert_eq!(MemberSortKey::from_id(key.id()), Some(key));
        }
        assert_eq!(MemberSortKey::from_id("nonsense"), None);
    }

    #[test]
    fn test_page_lines_are_ranked_and_bounded() {
        let table = table(45);
        let state = SortState::new(MemberSortKey::Contributed, None);

        assert_eq!(table.page_count(), 3);
        let first = table.page_lines(&state);
        assert_eq!(first.len(), PAGE_SIZE);
        assert!(first[0].contains("Airline 44"));
        assert!(first[0].starts_with("`  1`"));

        let last = table.page_lines(&SortState { page: 2, ..state });
        assert_eq!(last.len(), 5);
        assert!(last[0].starts_with("` 41`"));
    }

    #[tokio::test]
    async fn test_paging_respects_bounds() {
        let table = table(45);
        let state = SortState::new(MemberSortKey::Flights, None);

        let error = apply(&table, &state, ComponentEvent::button(1, PREV_ID)).await.unwrap_err();
        assert!(error.is_user_facing());

        let second = apply(&table, &state, ComponentEvent::button(1, NEXT_ID)).await.unwrap();
        let third = apply(&table, &second, ComponentEvent::button(1, NEXT_ID)).await.unwrap();
        assert_eq!(third.page, 2);
        assert!(apply(&table, &third, ComponentEvent::button(1, NEXT_ID)).await.is_err());

        let back = apply(&table, &third, ComponentEvent::button(1, PREV_ID)).await.unwrap();
        assert_eq!(back.page, 1);
    }

    #[tokio::test]
    async fn test_changing_key_resets_page_and_direction() {
        let table = table(45);
        let state = SortState {
            key: MemberSortKey::Contributed,
            direction: SortDirection::Ascending,
            page: 2,
        };

        let next = apply(&table, &state, ComponentEvent::select(1, SORT_SELECT_ID, "name"))
            .await
            .unwrap();
        assert_eq!(next, SortState::new(MemberSortKey::Name, Some(SortDirection::Ascending)));

        let toggled = apply(&table, &state, ComponentEvent::button(1, DIRECTION_ID)).await.unwrap();
        assert_eq!(toggled.direction, SortDirection::Descending);
        assert_eq!(toggled.page, 0);
    }

    #[tokio::test]
    async fn test_unknown_sort_key_is_user_error() {
        let table = table(3);
        let state = SortState::new(MemberSortKey::Name, None);
        let error = apply(&table, &state, ComponentEvent::select(1, SORT_SELECT_ID, "payroll"))
            .await
            .unwrap_err();
        assert!(error.is_user_facing());
    }

    #[test]
    fn test_render_fields_fit_discord_limits() {
        let mut members = Vec::new();
        for i in 0..60 {
            let name = format!("A very long airline name number {i:03} {}", "x".repeat(40));
            members.push(member(i, &name, i * 7, i));
        }
        let table = MemberTable::new("Oneworld", members);
        let rendered = table.render(&SortState::new(MemberSortKey::Contributed, None));

        let embed = rendered.embed.unwrap();
        assert!(embed.fields.len() > 1);
        assert!(embed.fields.len() <= MAX_EMBED_FIELDS);
        assert!(embed.fields.iter().all(|f| f.value.chars().count() <= FIELD_VALUE_LIMIT));
        assert_eq!(embed.footer.as_deref(), Some("Page 1/3 · 60 members"));

        let ControlRow::Buttons(buttons) = &rendered.rows[1] else {
            panic!("expected the paging row");
        };
        assert!(buttons[0].disabled);
        assert!(!buttons[2].disabled);
    }

    #[test]
    fn test_render_empty_alliance() {
        let table = MemberTable::new("Empty", Vec::new());
        let rendered = table.render(&SortState::new(MemberSortKey::Name, None));
        let embed = rendered.embed.unwrap();
        assert!(embed.fields.is_empty());
        assert_eq!(embed.description.as_deref(), Some("This alliance has no members."));
    }
}
