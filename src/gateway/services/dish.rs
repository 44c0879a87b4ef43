//! Dish Service - guard chains and terminal steps for `/dishes`
//!
//! | Operation | Guards (in order)                                      |
//! |-----------|--------------------------------------------------------|
//! | list      | -                                                      |
//! | create    | name, description, price, image_url                    |
//! | read      | exists                                                 |
//! | update    | exists, id-match, name, description, price, image_url  |
//!
//! Dishes are never deleted.

use std::sync::{Mutex, MutexGuard};

use crate::core_types::next_id;
use crate::error::ApiError;
use crate::guard::{
    Guard, GuardChain, GuardContext, id_matches_route, read_text, record_exists, require_text,
};
use crate::models::Dish;
use crate::payload::Payload;
use crate::repository::{InMemoryRepository, Repository};

const DISH: &str = "Dish";

// ============================================================================
// Guards
// ============================================================================

fn dish_exists() -> Guard<Dish> {
    record_exists(|id| format!("Dish does not exist: {id}"))
}

fn dish_id_matches_route() -> Guard<Dish> {
    id_matches_route(|id, route| {
        format!("Dish id does not match route id. Dish: {id}, Route: {route}")
    })
}

/// `price` present and an integer > 0
fn valid_price() -> Guard<Dish> {
    Guard::new("valid_price", |ctx: &GuardContext<'_, Dish>| {
        read_price(ctx.payload).map(|_| ())
    })
}

fn read_price(payload: &Payload) -> Result<u64, ApiError> {
    if !payload.has("price") {
        return Err(ApiError::validation("Dish must include a price"));
    }
    payload.positive_integer("price").ok_or_else(|| {
        ApiError::validation("Dish must include a price that is an integer greater than 0")
    })
}

/// Field guards shared by create and update
fn with_field_guards(chain: GuardChain<Dish>) -> GuardChain<Dish> {
    chain
        .then(require_text(DISH, "name"))
        .then(require_text(DISH, "description"))
        .then(valid_price())
        .then(require_text(DISH, "image_url"))
}

// ============================================================================
// Service
// ============================================================================

/// Dish Service - one lock around the collection; every call runs its guard
/// chain and terminal step while holding it.
pub struct DishService {
    repo: Mutex<Box<dyn Repository<Dish>>>,
    next_id: Box<dyn Fn() -> String + Send + Sync>,
    create_chain: GuardChain<Dish>,
    read_chain: GuardChain<Dish>,
    update_chain: GuardChain<Dish>,
}

impl Default for DishService {
    fn default() -> Self {
        Self::new(InMemoryRepository::new())
    }
}

impl DishService {
    pub fn new(repo: impl Repository<Dish> + 'static) -> Self {
        Self::with_id_generator(repo, next_id)
    }

    /// Same as `new` with a custom id source
    pub fn with_id_generator(
        repo: impl Repository<Dish> + 'static,
        next_id: impl Fn() -> String + Send + Sync + 'static,
    ) -> Self {
        Self {
            repo: Mutex::new(Box::new(repo)),
            next_id: Box::new(next_id),
            create_chain: with_field_guards(GuardChain::new("dish.create")),
            read_chain: GuardChain::new("dish.read").then(dish_exists()),
            update_chain: with_field_guards(
                GuardChain::new("dish.update")
                    .then(dish_exists())
                    .then(dish_id_matches_route()),
            ),
        }
    }

    fn repo(&self) -> Result<MutexGuard<'_, Box<dyn Repository<Dish>>>, ApiError> {
        self.repo
            .lock()
            .map_err(|_| ApiError::internal("dish repository lock poisoned"))
    }

    pub fn len(&self) -> Result<usize, ApiError> {
        Ok(self.repo()?.len())
    }

    pub fn is_empty(&self) -> Result<bool, ApiError> {
        Ok(self.repo()?.is_empty())
    }

    /// All dishes in insertion order
    pub fn list(&self) -> Result<Vec<Dish>, ApiError> {
        Ok(self.repo()?.list())
    }

    /// Validate and store a new dish under a fresh id
    pub fn create(&self, payload: &Payload) -> Result<Dish, ApiError> {
        let mut repo = self.repo()?;
        self.create_chain.run(&GuardContext::new(payload))?;

        let dish = Dish {
            id: (self.next_id)(),
            name: read_text(payload, DISH, "name")?.to_string(),
            description: read_text(payload, DISH, "description")?.to_string(),
            price: read_price(payload)?,
            image_url: read_text(payload, DISH, "image_url")?.to_string(),
        };
        let dish = repo.insert(dish)?;
        tracing::info!(dish_id = %dish.id, name = %dish.name, "dish created");
        Ok(dish)
    }

    pub fn read(&self, dish_id: &str) -> Result<Dish, ApiError> {
        let repo = self.repo()?;
        let found = repo.get(dish_id);
        let empty = Payload::default();
        self.read_chain
            .run(&GuardContext::for_route(&empty, dish_id, found.as_ref()))?;
        found.ok_or_else(|| ApiError::not_found(format!("Dish does not exist: {dish_id}")))
    }

    /// Overwrite name, description, price and image_url; the id never changes
    pub fn update(&self, dish_id: &str, payload: &Payload) -> Result<Dish, ApiError> {
        let mut repo = self.repo()?;
        let found = repo.get(dish_id);
        self.update_chain
            .run(&GuardContext::for_route(payload, dish_id, found.as_ref()))?;

        let mut dish =
            found.ok_or_else(|| ApiError::not_found(format!("Dish does not exist: {dish_id}")))?;
        dish.name = read_text(payload, DISH, "name")?.to_string();
        dish.description = read_text(payload, DISH, "description")?.to_string();
        dish.price = read_price(payload)?;
        dish.image_url = read_text(payload, DISH, "image_url")?.to_string();

        let dish = repo.update(dish)?;
        tracing::info!(dish_id = %dish.id, "dish updated");
        Ok(dish)
    }
}
