//! PokeAPI client and view-model mapping

use std::sync::{Arc, OnceLock};

use ratatui::style::Color;
use serde::Deserialize;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;

use crate::state::{DetailView, SummaryView};

const API_BASE: &str = "https://pokeapi.co/api/v2";
const INDEX_CONCURRENCY: usize = 12;

#[derive(Clone, Debug, Deserialize)]
struct NamedResource {
    name: String,
}

#[derive(Clone, Debug, Deserialize)]
struct PokemonResponse {
    id: u16,
    name: String,
    height: u16,
    weight: u16,
    types: Vec<PokemonTypeSlot>,
    sprites: serde_json::Value,
    abilities: Vec<PokemonAbilitySlot>,
    moves: Vec<PokemonMoveSlot>,
}

#[derive(Clone, Debug, Deserialize)]
struct PokemonTypeSlot {
    #[serde(rename = "type")]
    type_info: NamedResource,
}

#[derive(Clone, Debug, Deserialize)]
struct PokemonAbilitySlot {
    ability: NamedResource,
}

#[derive(Clone, Debug, Deserialize)]
struct PokemonMoveSlot {
    #[serde(rename = "move")]
    move_info: NamedResource,
}

async fn fetch_pokemon(id: u16) -> Result<PokemonResponse, String> {
    let url = format!("{API_BASE}/pokemon/{id}");
    let response = http_client()
        .get(&url)
        .send()
        .await
        .map_err(|err| format!("pokemon {id}: {err}"))?;
    let response = response
        .error_for_status()
        .map_err(|err| format!("pokemon {id}: {err}"))?;
    response
        .json()
        .await
        .map_err(|err| format!("pokemon {id}: {err}"))
}

/// Fetch ids 1..=limit concurrently and return summaries in ascending id
/// order regardless of completion order. Fail-fast: the first error aborts
/// the remaining requests and no partial list is returned.
pub async fn fetch_summary_index(limit: u16) -> Result<Vec<SummaryView>, String> {
    if limit == 0 {
        return Ok(Vec::new());
    }

    let semaphore = Arc::new(Semaphore::new(INDEX_CONCURRENCY));
    let mut join_set = JoinSet::new();
    for id in 1..=limit {
        let semaphore = Arc::clone(&semaphore);
        join_set.spawn(async move {
            let _permit = semaphore
                .acquire_owned()
                .await
                .map_err(|_| "Dex index semaphore closed".to_string())?;
            fetch_pokemon(id).await.map(summary_from_response)
        });
    }

    let mut results = Vec::with_capacity(usize::from(limit));
    while let Some(joined) = join_set.join_next().await {
        let result = joined.unwrap_or_else(|err| Err(err.to_string()));
        let failed = result.is_err();
        results.push(result);
        if failed {
            join_set.abort_all();
            break;
        }
    }

    ordered_index(limit, results)
}

/// Assemble completion-ordered fetch results into an ascending-id list.
/// The first error wins and discards everything else; a slot no result
/// claimed is also an error, so the caller never sees a partial list.
fn ordered_index(
    limit: u16,
    results: Vec<Result<SummaryView, String>>,
) -> Result<Vec<SummaryView>, String> {
    let mut slots: Vec<Option<SummaryView>> = vec![None; usize::from(limit)];
    for result in results {
        let summary = result?;
        let index = usize::from(summary.id).saturating_sub(1);
        if let Some(slot) = slots.get_mut(index) {
            *slot = Some(summary);
        }
    }

    slots
        .into_iter()
        .enumerate()
        .map(|(index, slot)| slot.ok_or_else(|| format!("pokemon {}: missing from index", index + 1)))
        .collect()
}

pub async fn fetch_detail(id: u16) -> Result<DetailView, String> {
    fetch_pokemon(id).await.map(detail_from_response)
}

fn summary_from_response(response: PokemonResponse) -> SummaryView {
    SummaryView {
        id: response.id,
        name: format_display_name(&response.name),
        image: image_url(&response.sprites),
        types: response
            .types
            .into_iter()
            .map(|slot| format_display_name(&slot.type_info.name))
            .collect(),
        height: response.height,
        weight: response.weight,
    }
}

fn detail_from_response(response: PokemonResponse) -> DetailView {
    DetailView {
        id: response.id,
        name: format_display_name(&response.name),
        image: image_url(&response.sprites),
        types: response
            .types
            .iter()
            .map(|slot| format_display_name(&slot.type_info.name))
            .collect(),
        height: response.height,
        weight: response.weight,
        abilities: response
            .abilities
            .iter()
            .map(|slot| format_display_name(&slot.ability.name))
            .collect(),
        moves: response
            .moves
            .iter()
            .map(|slot| format_display_name(&slot.move_info.name))
            .collect(),
    }
}

/// Official artwork front image, falling back to the default front sprite.
/// Empty strings count as absent.
fn image_url(sprites: &serde_json::Value) -> Option<String> {
    pointer_string(sprites, "/other/official-artwork/front_default")
        .or_else(|| pointer_string(sprites, "/front_default"))
}

fn pointer_string(value: &serde_json::Value, pointer: &str) -> Option<String> {
    value
        .pointer(pointer)
        .and_then(|val| val.as_str())
        .filter(|s| !s.is_empty())
        .map(|s| s.to_string())
}

/// Three-digit zero-padded dex number: 1 -> "#001", 151 -> "#151".
pub fn format_dex_number(id: u16) -> String {
    format!("#{id:03}")
}

/// First character uppercased, hyphens to spaces, the rest lowercased:
/// "poison-point" -> "Poison point".
pub fn format_display_name(raw: &str) -> String {
    let spaced = raw.replace('-', " ");
    let mut chars = spaced.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
        None => String::new(),
    }
}

/// Canonical color for a type label, case-insensitive. Unknown types fall
/// back to the "normal" color.
pub fn type_color(type_name: &str) -> Color {
    match type_name.to_ascii_lowercase().as_str() {
        "fire" => Color::Rgb(0xF0, 0x80, 0x30),
        "water" => Color::Rgb(0x68, 0x90, 0xF0),
        "electric" => Color::Rgb(0xF8, 0xD0, 0x30),
        "grass" => Color::Rgb(0x78, 0xC8, 0x50),
        "ice" => Color::Rgb(0x98, 0xD8, 0xD8),
        "fighting" => Color::Rgb(0xC0, 0x30, 0x28),
        "poison" => Color::Rgb(0xA0, 0x40, 0xA0),
        "ground" => Color::Rgb(0xE0, 0xC0, 0x68),
        "flying" => Color::Rgb(0xA8, 0x90, 0xF0),
        "psychic" => Color::Rgb(0xF8, 0x58, 0x88),
        "bug" => Color::Rgb(0xA8, 0xB8, 0x20),
        "rock" => Color::Rgb(0xB8, 0xA0, 0x38),
        "ghost" => Color::Rgb(0x70, 0x58, 0x98),
        "dragon" => Color::Rgb(0x70, 0x38, 0xF8),
        "dark" => Color::Rgb(0x70, 0x58, 0x48),
        "steel" => Color::Rgb(0xB8, 0xB8, 0xD0),
        "fairy" => Color::Rgb(0xEE, 0x99, 0xAC),
        // "normal" and anything unrecognized
        _ => Color::Rgb(0xA8, 0xA8, 0x78),
    }
}

fn http_client() -> &'static reqwest::Client {
    static CLIENT: OnceLock<reqwest::Client> = OnceLock::new();
    CLIENT.get_or_init(reqwest::Client::new)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn dex_number_zero_pads_to_three_digits() {
        assert_eq!(format_dex_number(1), "#001");
        assert_eq!(format_dex_number(7), "#007");
        assert_eq!(format_dex_number(25), "#025");
        assert_eq!(format_dex_number(150), "#150");
        assert_eq!(format_dex_number(151), "#151");

        for id in 0..=999 {
            let label = format_dex_number(id);
            assert_eq!(label.len(), 4);
            assert!(label.starts_with('#'));
            assert_eq!(label[1..].parse::<u16>().unwrap(), id);
        }
    }

    #[test]
    fn display_name_capitalizes_and_unhyphenates() {
        assert_eq!(format_display_name("pikachu"), "Pikachu");
        assert_eq!(format_display_name("poison-point"), "Poison point");
        assert_eq!(format_display_name("mr-mime"), "Mr mime");
        assert_eq!(format_display_name("FIRE"), "Fire");
        assert_eq!(format_display_name(""), "");
    }

    #[test]
    fn type_color_is_case_insensitive() {
        assert_eq!(type_color("fire"), Color::Rgb(0xF0, 0x80, 0x30));
        assert_eq!(type_color("FIRE"), Color::Rgb(0xF0, 0x80, 0x30));
        assert_eq!(type_color("Water"), Color::Rgb(0x68, 0x90, 0xF0));
    }

    #[test]
    fn type_color_unknown_falls_back_to_normal() {
        let normal = Color::Rgb(0xA8, 0xA8, 0x78);
        assert_eq!(type_color("normal"), normal);
        assert_eq!(type_color("unknown-type"), normal);
        assert_eq!(type_color(""), normal);
    }

    fn summary(id: u16) -> SummaryView {
        SummaryView {
            id,
            name: format!("Entry {id}"),
            image: None,
            types: vec!["Normal".to_string()],
            height: 7,
            weight: 69,
        }
    }

    #[test]
    fn index_is_ordered_regardless_of_completion_order() {
        let results = vec![Ok(summary(3)), Ok(summary(1)), Ok(summary(4)), Ok(summary(2))];
        let index = ordered_index(4, results).unwrap();
        let ids: Vec<u16> = index.iter().map(|item| item.id).collect();
        assert_eq!(ids, vec![1, 2, 3, 4]);
    }

    #[test]
    fn index_first_error_discards_partial_results() {
        let results = vec![
            Ok(summary(1)),
            Err("pokemon 2: connection reset".to_string()),
            Ok(summary(3)),
        ];
        let error = ordered_index(3, results).unwrap_err();
        assert_eq!(error, "pokemon 2: connection reset");
    }

    #[test]
    fn index_unclaimed_slot_is_an_error() {
        let results = vec![Ok(summary(1)), Ok(summary(3))];
        let error = ordered_index(3, results).unwrap_err();
        assert_eq!(error, "pokemon 2: missing from index");
    }

    fn raw_record(sprites: serde_json::Value) -> PokemonResponse {
        serde_json::from_value(json!({
            "id": 25,
            "name": "pikachu",
            "height": 4,
            "weight": 60,
            "types": [{"type": {"name": "electric"}}],
            "sprites": sprites,
            "abilities": [
                {"ability": {"name": "static"}},
                {"ability": {"name": "lightning-rod"}},
            ],
            "moves": [{"move": {"name": "thunder-shock"}}],
        }))
        .unwrap()
    }

    #[test]
    fn summary_prefers_official_artwork() {
        let record = raw_record(json!({
            "front_default": "https://sprites/25.png",
            "other": {"official-artwork": {"front_default": "https://art/25.png"}},
        }));
        let summary = summary_from_response(record);
        assert_eq!(summary.image.as_deref(), Some("https://art/25.png"));
        assert_eq!(summary.name, "Pikachu");
        assert_eq!(summary.types, vec!["Electric".to_string()]);
    }

    #[test]
    fn summary_falls_back_to_front_sprite() {
        let record = raw_record(json!({
            "front_default": "https://sprites/25.png",
            "other": {"official-artwork": {"front_default": ""}},
        }));
        let summary = summary_from_response(record);
        assert_eq!(summary.image.as_deref(), Some("https://sprites/25.png"));
    }

    #[test]
    fn summary_image_absent_when_no_sprites() {
        let record = raw_record(json!({"front_default": null, "other": {}}));
        let summary = summary_from_response(record);
        assert_eq!(summary.image, None);
    }

    #[test]
    fn detail_formats_ability_and_move_labels() {
        let record = raw_record(json!({"front_default": "https://sprites/25.png"}));
        let detail = detail_from_response(record);
        assert_eq!(
            detail.abilities,
            vec!["Static".to_string(), "Lightning rod".to_string()]
        );
        assert_eq!(detail.moves, vec!["Thunder shock".to_string()]);
        assert_eq!(detail.height, 4);
        assert_eq!(detail.weight, 60);
    }
}
