//! The graph store
//!
//! Sole owner of all scopes, items, and host records, plus the global
//! indexes mapping full identifiers to entities and node labels to
//! hosts. Mutators keep both sides of every relation in step: a link or
//! unlink updates the entity set and the host set together or not at
//! all.
//!
//! Garbage collection is a local emptiness check with cascading effect:
//! removing the last child of a scope re-checks that scope, and so on up
//! the graph.

use std::collections::{BTreeSet, HashMap};

use meridian_core::{FullId, MeridianError, MeridianResult, NodeLabel, Strategy};

use crate::{InformationItem, ItemKey, RemoteHost, Scope, ScopeKey};

/// All mutable rendezvous state.
#[derive(Debug, Default)]
pub struct GraphStore {
    scopes: HashMap<ScopeKey, Scope>,
    items: HashMap<ItemKey, InformationItem>,
    /// Full identifier -> scope. Several identifiers may resolve to the
    /// same scope.
    scope_index: HashMap<FullId, ScopeKey>,
    /// Full identifier -> item, same sharing.
    item_index: HashMap<FullId, ItemKey>,
    hosts: HashMap<NodeLabel, RemoteHost>,
    next_key: u64,
}

impl GraphStore {
    pub fn new() -> Self {
        GraphStore::default()
    }

    fn alloc(&mut self) -> u64 {
        let k = self.next_key;
        self.next_key += 1;
        k
    }

    // ----- lookups -----

    pub fn find_scope(&self, id: &FullId) -> Option<ScopeKey> {
        self.scope_index.get(id).copied()
    }

    pub fn find_item(&self, id: &FullId) -> Option<ItemKey> {
        self.item_index.get(id).copied()
    }

    /// Panics on a stale key; keys are only obtained from `find_*` or a
    /// `create_*` in the same handler.
    pub fn scope(&self, key: ScopeKey) -> &Scope {
        &self.scopes[&key]
    }

    pub fn item(&self, key: ItemKey) -> &InformationItem {
        &self.items[&key]
    }

    pub fn host(&self, label: &NodeLabel) -> Option<&RemoteHost> {
        self.hosts.get(label)
    }

    pub fn find_or_create_host(&mut self, label: NodeLabel) -> &mut RemoteHost {
        self.hosts
            .entry(label)
            .or_insert_with(|| RemoteHost::new(label))
    }

    /// Register the engine's own node; the record is never collected.
    pub fn register_local_host(&mut self, label: NodeLabel) {
        self.find_or_create_host(label).local = true;
    }

    pub fn scope_count(&self) -> usize {
        self.scopes.len()
    }

    pub fn item_count(&self) -> usize {
        self.items.len()
    }

    pub fn host_count(&self) -> usize {
        self.hosts.len()
    }

    pub fn indexed_scope_ids(&self) -> impl Iterator<Item = &FullId> {
        self.scope_index.keys()
    }

    pub fn indexed_item_ids(&self) -> impl Iterator<Item = &FullId> {
        self.item_index.keys()
    }

    // ----- entity creation -----

    pub fn create_root_scope(&mut self, id: FullId, strategy: Strategy) -> ScopeKey {
        let key = ScopeKey(self.alloc());
        self.scope_index.insert(id.clone(), key);
        self.scopes.insert(key, Scope::new(strategy, id));
        key
    }

    pub fn create_scope_under(
        &mut self,
        parent: ScopeKey,
        id: FullId,
        strategy: Strategy,
    ) -> ScopeKey {
        let key = ScopeKey(self.alloc());
        let mut scope = Scope::new(strategy, id.clone());
        scope.parents.insert(parent);
        self.scope_index.insert(id, key);
        self.scopes.insert(key, scope);
        if let Some(p) = self.scopes.get_mut(&parent) {
            p.child_scopes.insert(key);
        }
        key
    }

    pub fn create_item_under(
        &mut self,
        parent: ScopeKey,
        id: FullId,
        strategy: Strategy,
    ) -> ItemKey {
        let key = ItemKey(self.alloc());
        let mut item = InformationItem::new(strategy, id.clone());
        item.parents.insert(parent);
        self.item_index.insert(id, key);
        self.items.insert(key, item);
        if let Some(p) = self.scopes.get_mut(&parent) {
            p.child_items.insert(key);
        }
        key
    }

    /// Republish: register an additional identifier for an existing
    /// scope and link it under another parent.
    pub fn add_scope_alias(&mut self, key: ScopeKey, parent: ScopeKey, id: FullId) {
        if let Some(scope) = self.scopes.get_mut(&key) {
            scope.ids.insert(id.clone());
            scope.parents.insert(parent);
        }
        self.scope_index.insert(id, key);
        if let Some(p) = self.scopes.get_mut(&parent) {
            p.child_scopes.insert(key);
        }
    }

    pub fn add_item_alias(&mut self, key: ItemKey, parent: ScopeKey, id: FullId) {
        if let Some(item) = self.items.get_mut(&key) {
            item.ids.insert(id.clone());
            item.parents.insert(parent);
        }
        self.item_index.insert(id, key);
        if let Some(p) = self.scopes.get_mut(&parent) {
            p.child_items.insert(key);
        }
    }

    // ----- host <-> entity links -----
    //
    // Entity-side membership is by host; host-side membership is by the
    // specific full identifier the request used. A host leaves an
    // entity's set only when it holds none of the entity's identifiers.

    pub fn link_scope_publisher(&mut self, key: ScopeKey, label: NodeLabel, id: &FullId) {
        if let Some(scope) = self.scopes.get_mut(&key) {
            scope.publishers.insert(label);
        }
        self.find_or_create_host(label)
            .published_scopes
            .insert(id.clone());
    }

    pub fn unlink_scope_publisher(&mut self, key: ScopeKey, label: NodeLabel, id: &FullId) {
        if let Some(host) = self.hosts.get_mut(&label) {
            host.published_scopes.remove(id);
        }
        if !self.host_holds(&label, key, HostSet::PublishedScopes) {
            if let Some(scope) = self.scopes.get_mut(&key) {
                scope.publishers.remove(&label);
            }
        }
    }

    pub fn link_scope_subscriber(&mut self, key: ScopeKey, label: NodeLabel, id: &FullId) {
        if let Some(scope) = self.scopes.get_mut(&key) {
            scope.subscribers.insert(label);
        }
        self.find_or_create_host(label)
            .subscribed_scopes
            .insert(id.clone());
    }

    pub fn unlink_scope_subscriber(&mut self, key: ScopeKey, label: NodeLabel, id: &FullId) {
        if let Some(host) = self.hosts.get_mut(&label) {
            host.subscribed_scopes.remove(id);
        }
        if !self.host_holds(&label, key, HostSet::SubscribedScopes) {
            if let Some(scope) = self.scopes.get_mut(&key) {
                scope.subscribers.remove(&label);
            }
        }
    }

    pub fn link_item_publisher(&mut self, key: ItemKey, label: NodeLabel, id: &FullId) {
        if let Some(item) = self.items.get_mut(&key) {
            item.publishers.insert(label);
        }
        self.find_or_create_host(label)
            .published_items
            .insert(id.clone());
    }

    pub fn unlink_item_publisher(&mut self, key: ItemKey, label: NodeLabel, id: &FullId) {
        if let Some(host) = self.hosts.get_mut(&label) {
            host.published_items.remove(id);
        }
        if !self.host_holds_item(&label, key, HostSet::PublishedItems) {
            if let Some(item) = self.items.get_mut(&key) {
                item.publishers.remove(&label);
            }
        }
    }

    pub fn link_item_subscriber(&mut self, key: ItemKey, label: NodeLabel, id: &FullId) {
        if let Some(item) = self.items.get_mut(&key) {
            item.subscribers.insert(label);
        }
        self.find_or_create_host(label)
            .subscribed_items
            .insert(id.clone());
    }

    pub fn unlink_item_subscriber(&mut self, key: ItemKey, label: NodeLabel, id: &FullId) {
        if let Some(host) = self.hosts.get_mut(&label) {
            host.subscribed_items.remove(id);
        }
        if !self.host_holds_item(&label, key, HostSet::SubscribedItems) {
            if let Some(item) = self.items.get_mut(&key) {
                item.subscribers.remove(&label);
            }
        }
    }

    fn host_holds(&self, label: &NodeLabel, key: ScopeKey, set: HostSet) -> bool {
        let (Some(host), Some(scope)) = (self.hosts.get(label), self.scopes.get(&key)) else {
            return false;
        };
        let held = set.of(host);
        scope.ids.iter().any(|id| held.contains(id))
    }

    fn host_holds_item(&self, label: &NodeLabel, key: ItemKey, set: HostSet) -> bool {
        let (Some(host), Some(item)) = (self.hosts.get(label), self.items.get(&key)) else {
            return false;
        };
        let held = set.of(host);
        item.ids.iter().any(|id| held.contains(id))
    }

    /// Drop a remote host record once it holds no references. The local
    /// host record is retained for the lifetime of the engine.
    pub fn drop_host_if_idle(&mut self, label: NodeLabel) {
        if let Some(host) = self.hosts.get(&label) {
            if host.is_idle() && !host.local {
                self.hosts.remove(&label);
            }
        }
    }

    // ----- garbage collection -----

    /// An entity with no publishers, subscribers, or children is
    /// removed, cascading into parents that thereby become collectable.
    pub fn collect_scope_if_empty(&mut self, key: ScopeKey) {
        let collectable = self
            .scopes
            .get(&key)
            .map(|s| s.is_collectable())
            .unwrap_or(false);
        if collectable {
            self.remove_scope(key);
        }
    }

    fn remove_scope(&mut self, key: ScopeKey) {
        let Some(scope) = self.scopes.remove(&key) else {
            return;
        };
        for id in &scope.ids {
            self.scope_index.remove(id);
        }
        for parent in scope.parents {
            if let Some(p) = self.scopes.get_mut(&parent) {
                p.child_scopes.remove(&key);
            }
            self.collect_scope_if_empty(parent);
        }
    }

    pub fn collect_item_if_empty(&mut self, key: ItemKey) {
        let collectable = self
            .items
            .get(&key)
            .map(|i| i.is_collectable())
            .unwrap_or(false);
        if collectable {
            self.remove_item(key);
        }
    }

    fn remove_item(&mut self, key: ItemKey) {
        let Some(item) = self.items.remove(&key) else {
            return;
        };
        for id in &item.ids {
            self.item_index.remove(id);
        }
        for parent in item.parents {
            if let Some(p) = self.scopes.get_mut(&parent) {
                p.child_items.remove(&key);
            }
            self.collect_scope_if_empty(parent);
        }
    }

    // ----- graph walks -----

    /// Union of the item's subscribers with the subscribers of every
    /// ancestor scope along every path from any root down to the item.
    pub fn subscriber_closure(&self, key: ItemKey) -> BTreeSet<NodeLabel> {
        let mut subs = BTreeSet::new();
        let Some(item) = self.items.get(&key) else {
            return subs;
        };
        subs.extend(item.subscribers.iter().copied());

        let mut stack: Vec<ScopeKey> = item.parents.iter().copied().collect();
        let mut seen: BTreeSet<ScopeKey> = stack.iter().copied().collect();
        while let Some(k) = stack.pop() {
            if let Some(scope) = self.scopes.get(&k) {
                subs.extend(scope.subscribers.iter().copied());
                for p in &scope.parents {
                    if seen.insert(*p) {
                        stack.push(*p);
                    }
                }
            }
        }
        subs
    }

    // ----- invariant validation -----

    /// Check the structural invariants. A violation is an implementation
    /// bug, never peer misbehavior; callers abort on `Err`.
    pub fn validate(&self) -> MeridianResult<()> {
        // (1) no identifier names both a scope and an item
        for id in self.scope_index.keys() {
            if self.item_index.contains_key(id) {
                return fail(format!("identifier {id} is both a scope and an item"));
            }
        }

        // (2) index <-> id-set agreement, both directions
        for (id, key) in &self.scope_index {
            match self.scopes.get(key) {
                Some(s) if s.ids.contains(id) => {}
                _ => return fail(format!("scope index entry {id} does not resolve back")),
            }
        }
        for (key, scope) in &self.scopes {
            for id in &scope.ids {
                if self.scope_index.get(id) != Some(key) {
                    return fail(format!("scope identifier {id} missing from index"));
                }
            }
        }
        for (id, key) in &self.item_index {
            match self.items.get(key) {
                Some(i) if i.ids.contains(id) => {}
                _ => return fail(format!("item index entry {id} does not resolve back")),
            }
        }
        for (key, item) in &self.items {
            for id in &item.ids {
                if self.item_index.get(id) != Some(key) {
                    return fail(format!("item identifier {id} missing from index"));
                }
            }
        }

        // (3) every identifier's prefix is empty (root scope) or an
        // identifier of a parent
        for scope in self.scopes.values() {
            for id in &scope.ids {
                let prefix = match id.prefix() {
                    Some(p) => p,
                    None => return fail("scope with empty identifier".into()),
                };
                if prefix.is_empty() {
                    continue;
                }
                let anchored = scope
                    .parents
                    .iter()
                    .filter_map(|pk| self.scopes.get(pk))
                    .any(|p| p.ids.contains(&prefix));
                if !anchored {
                    return fail(format!("scope identifier {id} has no parent anchor"));
                }
            }
        }
        for item in self.items.values() {
            for id in &item.ids {
                let prefix = match id.prefix() {
                    Some(p) if !p.is_empty() => p,
                    _ => return fail(format!("item identifier {id} lacks a parent prefix")),
                };
                let anchored = item
                    .parents
                    .iter()
                    .filter_map(|pk| self.scopes.get(pk))
                    .any(|p| p.ids.contains(&prefix));
                if !anchored {
                    return fail(format!("item identifier {id} has no parent anchor"));
                }
            }
        }

        // (4) host <-> entity cross-index symmetry
        for (key, scope) in &self.scopes {
            for label in &scope.publishers {
                if !self.host_holds(label, *key, HostSet::PublishedScopes) {
                    return fail(format!("{label} in scope publishers without a held id"));
                }
            }
            for label in &scope.subscribers {
                if !self.host_holds(label, *key, HostSet::SubscribedScopes) {
                    return fail(format!("{label} in scope subscribers without a held id"));
                }
            }
        }
        for (key, item) in &self.items {
            for label in &item.publishers {
                if !self.host_holds_item(label, *key, HostSet::PublishedItems) {
                    return fail(format!("{label} in item publishers without a held id"));
                }
            }
            for label in &item.subscribers {
                if !self.host_holds_item(label, *key, HostSet::SubscribedItems) {
                    return fail(format!("{label} in item subscribers without a held id"));
                }
            }
        }
        for host in self.hosts.values() {
            for id in &host.published_scopes {
                let ok = self
                    .find_scope(id)
                    .map(|k| self.scopes[&k].publishers.contains(&host.label))
                    .unwrap_or(false);
                if !ok {
                    return fail(format!("{} publishes unknown scope {id}", host.label));
                }
            }
            for id in &host.subscribed_scopes {
                let ok = self
                    .find_scope(id)
                    .map(|k| self.scopes[&k].subscribers.contains(&host.label))
                    .unwrap_or(false);
                if !ok {
                    return fail(format!("{} subscribes unknown scope {id}", host.label));
                }
            }
            for id in &host.published_items {
                let ok = self
                    .find_item(id)
                    .map(|k| self.items[&k].publishers.contains(&host.label))
                    .unwrap_or(false);
                if !ok {
                    return fail(format!("{} publishes unknown item {id}", host.label));
                }
            }
            for id in &host.subscribed_items {
                let ok = self
                    .find_item(id)
                    .map(|k| self.items[&k].subscribers.contains(&host.label))
                    .unwrap_or(false);
                if !ok {
                    return fail(format!("{} subscribes unknown item {id}", host.label));
                }
            }
        }

        // (5) strategy inheritance along every parent link
        for scope in self.scopes.values() {
            for pk in &scope.parents {
                if let Some(p) = self.scopes.get(pk) {
                    if p.strategy != scope.strategy {
                        return fail("scope strategy differs from parent".into());
                    }
                }
            }
            // child links must point at live entities
            for ck in &scope.child_scopes {
                if !self.scopes.contains_key(ck) {
                    return fail("dangling child scope link".into());
                }
            }
            for ck in &scope.child_items {
                if !self.items.contains_key(ck) {
                    return fail("dangling child item link".into());
                }
            }
        }
        for item in self.items.values() {
            for pk in &item.parents {
                if let Some(p) = self.scopes.get(pk) {
                    if p.strategy != item.strategy {
                        return fail("item strategy differs from parent".into());
                    }
                } else {
                    return fail("dangling item parent link".into());
                }
            }
        }

        // (6) no collectable entity survived
        for (key, scope) in &self.scopes {
            if scope.is_collectable() {
                return fail(format!("{key:?} is empty but still present"));
            }
        }
        for (key, item) in &self.items {
            if item.is_collectable() {
                return fail(format!("{key:?} is empty but still present"));
            }
        }

        Ok(())
    }
}

/// Selector over a host's four ownership sets.
#[derive(Clone, Copy)]
enum HostSet {
    PublishedScopes,
    SubscribedScopes,
    PublishedItems,
    SubscribedItems,
}

impl HostSet {
    fn of(self, host: &RemoteHost) -> &BTreeSet<FullId> {
        match self {
            HostSet::PublishedScopes => &host.published_scopes,
            HostSet::SubscribedScopes => &host.subscribed_scopes,
            HostSet::PublishedItems => &host.published_items,
            HostSet::SubscribedItems => &host.subscribed_items,
        }
    }
}

fn fail(msg: String) -> MeridianResult<()> {
    Err(MeridianError::InvariantViolated(msg))
}

#[cfg(test)]
mod tests {
    use super::*;
    use meridian_core::Fragment;

    fn fid(frags: &[u64]) -> FullId {
        FullId::from_fragments(&frags.iter().map(|&v| Fragment::from_u64(v)).collect::<Vec<_>>())
    }

    #[test]
    fn test_link_and_unlink_keep_both_sides() {
        let mut store = GraphStore::new();
        let a = NodeLabel::from_u64(0xA);
        let root = fid(&[1]);

        let key = store.create_root_scope(root.clone(), Strategy::DomainLocal);
        store.link_scope_publisher(key, a, &root);

        assert!(store.scope(key).publishers.contains(&a));
        assert!(store.host(&a).unwrap().published_scopes.contains(&root));
        store.validate().unwrap();

        store.unlink_scope_publisher(key, a, &root);
        assert!(!store.scope(key).publishers.contains(&a));
        assert!(store.host(&a).unwrap().published_scopes.is_empty());
    }

    #[test]
    fn test_unlink_keeps_membership_while_other_id_held() {
        let mut store = GraphStore::new();
        let a = NodeLabel::from_u64(0xA);
        let sub = NodeLabel::from_u64(0xB);

        let r1 = store.create_root_scope(fid(&[1]), Strategy::DomainLocal);
        let r2 = store.create_root_scope(fid(&[3]), Strategy::DomainLocal);
        store.link_scope_subscriber(r1, sub, &fid(&[1]));
        store.link_scope_subscriber(r2, sub, &fid(&[3]));

        let child = store.create_scope_under(r1, fid(&[1, 2]), Strategy::DomainLocal);
        store.add_scope_alias(child, r2, fid(&[3, 2]));
        store.link_scope_subscriber(child, sub, &fid(&[1, 2]));
        store.link_scope_publisher(child, a, &fid(&[1, 2]));
        store.link_scope_publisher(child, a, &fid(&[3, 2]));

        store.unlink_scope_publisher(child, a, &fid(&[1, 2]));
        // still publishing via the alias
        assert!(store.scope(child).publishers.contains(&a));

        store.unlink_scope_publisher(child, a, &fid(&[3, 2]));
        assert!(!store.scope(child).publishers.contains(&a));
        store.validate().unwrap();
    }

    #[test]
    fn test_cascading_collection() {
        let mut store = GraphStore::new();
        let sub = NodeLabel::from_u64(0xB);

        let root = store.create_root_scope(fid(&[1]), Strategy::DomainLocal);
        store.link_scope_subscriber(root, sub, &fid(&[1]));
        let inner = store.create_scope_under(root, fid(&[1, 2]), Strategy::DomainLocal);
        let item = store.create_item_under(inner, fid(&[1, 2, 5]), Strategy::DomainLocal);
        store.link_item_publisher(item, NodeLabel::from_u64(0xA), &fid(&[1, 2, 5]));

        // removing the item's last reference collects the item, then the
        // now-empty inner scope; the root survives on its subscriber
        store.unlink_item_publisher(item, NodeLabel::from_u64(0xA), &fid(&[1, 2, 5]));
        store.collect_item_if_empty(item);

        assert_eq!(store.item_count(), 0);
        assert!(store.find_scope(&fid(&[1, 2])).is_none());
        assert!(store.find_scope(&fid(&[1])).is_some());
        store.validate().unwrap();
    }

    #[test]
    fn test_aliased_scope_lives_until_last_reference() {
        let mut store = GraphStore::new();
        let a = NodeLabel::from_u64(0xA);
        let sub = NodeLabel::from_u64(0xB);

        let r1 = store.create_root_scope(fid(&[1]), Strategy::DomainLocal);
        store.link_scope_subscriber(r1, sub, &fid(&[1]));
        let r2 = store.create_root_scope(fid(&[3]), Strategy::DomainLocal);
        store.link_scope_subscriber(r2, sub, &fid(&[3]));

        let shared = store.create_scope_under(r1, fid(&[1, 2]), Strategy::DomainLocal);
        store.add_scope_alias(shared, r2, fid(&[3, 2]));
        store.link_scope_publisher(shared, a, &fid(&[1, 2]));
        store.link_scope_publisher(shared, a, &fid(&[3, 2]));

        // dropping one identifier leaves the publisher holding the
        // other, so the entity (with both branches) stays
        store.unlink_scope_publisher(shared, a, &fid(&[1, 2]));
        store.collect_scope_if_empty(shared);
        assert!(store.find_scope(&fid(&[1, 2])).is_some());
        assert!(store.find_scope(&fid(&[3, 2])).is_some());
        store.validate().unwrap();

        // dropping the last one collects every branch at once
        store.unlink_scope_publisher(shared, a, &fid(&[3, 2]));
        store.collect_scope_if_empty(shared);
        assert!(store.find_scope(&fid(&[1, 2])).is_none());
        assert!(store.find_scope(&fid(&[3, 2])).is_none());
        // both roots survive on their subscriber
        assert_eq!(store.scope_count(), 2);
        store.validate().unwrap();
    }

    #[test]
    fn test_subscriber_closure_walks_all_paths() {
        let mut store = GraphStore::new();
        let s1 = NodeLabel::from_u64(0xB);
        let s2 = NodeLabel::from_u64(0xC);
        let s3 = NodeLabel::from_u64(0xD);

        let r1 = store.create_root_scope(fid(&[1]), Strategy::DomainLocal);
        let r2 = store.create_root_scope(fid(&[3]), Strategy::DomainLocal);
        store.link_scope_subscriber(r1, s1, &fid(&[1]));
        store.link_scope_subscriber(r2, s2, &fid(&[3]));

        let mid = store.create_scope_under(r1, fid(&[1, 2]), Strategy::DomainLocal);
        store.add_scope_alias(mid, r2, fid(&[3, 2]));

        let item = store.create_item_under(mid, fid(&[1, 2, 5]), Strategy::DomainLocal);
        store.link_item_subscriber(item, s3, &fid(&[1, 2, 5]));
        // keep the graph valid for the walk
        store.link_scope_publisher(mid, NodeLabel::from_u64(0xA), &fid(&[1, 2]));

        let closure = store.subscriber_closure(item);
        assert!(closure.contains(&s1));
        assert!(closure.contains(&s2));
        assert!(closure.contains(&s3));
    }

    #[test]
    fn test_host_dropped_when_idle() {
        let mut store = GraphStore::new();
        let a = NodeLabel::from_u64(0xA);
        let root = fid(&[1]);

        let key = store.create_root_scope(root.clone(), Strategy::DomainLocal);
        store.link_scope_publisher(key, a, &root);
        store.unlink_scope_publisher(key, a, &root);
        store.drop_host_if_idle(a);
        assert!(store.host(&a).is_none());

        // the local host record survives idleness
        let local = NodeLabel::from_u64(0xF);
        store.register_local_host(local);
        store.drop_host_if_idle(local);
        assert!(store.host(&local).is_some());
    }

    #[test]
    fn test_validate_catches_strategy_divergence() {
        let mut store = GraphStore::new();
        let root = store.create_root_scope(fid(&[1]), Strategy::DomainLocal);
        store.link_scope_subscriber(root, NodeLabel::from_u64(0xB), &fid(&[1]));
        let child = store.create_scope_under(root, fid(&[1, 2]), Strategy::DomainLocal);
        store.link_scope_subscriber(child, NodeLabel::from_u64(0xB), &fid(&[1, 2]));

        // corrupt on purpose
        if let Some(s) = store.scopes.get_mut(&child) {
            s.strategy = Strategy::LinkLocal;
        }
        assert!(store.validate().is_err());
    }
}
