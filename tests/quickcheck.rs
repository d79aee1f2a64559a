use avl_index::{AvlTree, Dictionary, Error};
use compare::Compare;
use quickcheck::{Arbitrary, Gen, TestResult};
use quickcheck_macros::quickcheck;

/// Selects an entry of a tree to remove.
pub trait Remove<K, C> where C: Compare<K> {
    fn remove<V>(&self, tree: &mut AvlTree<K, V, C>) -> Option<(K, V)>;
}

/// Removes the entry found by key.
#[derive(Clone, Debug)]
struct Find<K>(K);

impl<K> Arbitrary for Find<K> where K: Arbitrary {
    fn arbitrary(gen: &mut Gen) -> Self { Find(K::arbitrary(gen)) }
    fn shrink(&self) -> Box<dyn Iterator<Item = Self>> { Box::new(self.0.shrink().map(Find)) }
}

impl<K, C> Remove<K, C> for Find<K> where C: Compare<K> {
    fn remove<V>(&self, tree: &mut AvlTree<K, V, C>) -> Option<(K, V)> {
        tree.remove_key(&self.0).unwrap().map(|e| e.into_key_value())
    }
}

/// Removes the entry at index `n % tree.len()` through its handle.
#[derive(Clone, Debug)]
struct Nth(usize);

impl Arbitrary for Nth {
    fn arbitrary(gen: &mut Gen) -> Self { Nth(usize::arbitrary(gen)) }
    fn shrink(&self) -> Box<dyn Iterator<Item = Self>> { Box::new(self.0.shrink().map(Nth)) }
}

impl<K, C> Remove<K, C> for Nth where C: Compare<K> {
    fn remove<V>(&self, tree: &mut AvlTree<K, V, C>) -> Option<(K, V)> {
        if tree.is_empty() { return None; }
        let handle = tree.entries().nth(self.0 % tree.len()).unwrap().handle();
        tree.remove(handle).ok().map(|e| e.into_key_value())
    }
}

macro_rules! remove {
    ($name:ident, $K:ty, $V:ty, $R:ty) => {
        mod $name {
            use super::Remove;
            use avl_index::AvlTree;
            use quickcheck::{TestResult, quickcheck};

            #[test]
            fn removes_entry() {
                fn test(mut tree: AvlTree<$K, $V>, removal: $R) -> TestResult {
                    let old_tree = tree.clone();

                    match removal.remove(&mut tree) {
                        None => TestResult::discard(),
                        Some((ref key, _)) => TestResult::from_bool(
                            tree.len() + 1 == old_tree.len() &&
                            tree.find_all(key).unwrap().count() + 1 ==
                                old_tree.find_all(key).unwrap().count()
                        ),
                    }
                }

                quickcheck(test as fn(AvlTree<$K, $V>, $R) -> TestResult);
            }

            #[test]
            fn affects_no_others() {
                fn test(mut tree: AvlTree<$K, $V>, removal: $R) -> bool {
                    let old: Vec<_> = tree.iter().map(|(k, v)| (*k, *v)).collect();

                    match removal.remove(&mut tree) {
                        None => tree.iter().map(|(k, v)| (*k, *v)).collect::<Vec<_>>() == old,
                        Some(removed) => {
                            let mut expected = old.clone();
                            let at = expected.iter().position(|e| *e == removed).unwrap();
                            expected.remove(at);
                            tree.iter().map(|(k, v)| (*k, *v)).collect::<Vec<_>>() == expected
                        }
                    }
                }

                quickcheck(test as fn(AvlTree<$K, $V>, $R) -> bool);
            }

            #[test]
            fn stays_balanced() {
                fn test(mut tree: AvlTree<$K, $V>, removal: $R) -> bool {
                    removal.remove(&mut tree);
                    super::height_is_logarithmic(&tree)
                }

                quickcheck(test as fn(AvlTree<$K, $V>, $R) -> bool);
            }
        }
    }
}

/// An AVL tree with `n` entries is at most `1.44 log2(n + 2)` high.
fn height_is_logarithmic<K, V, C>(tree: &AvlTree<K, V, C>) -> bool where C: Compare<K> {
    let bound = 1.4405 * ((tree.len() + 2) as f64).log2() - 0.3277;
    (tree.height() as f64) <= bound
}

remove!{by_key, u32, u16, super::Find<u32>}
remove!{by_handle, u32, u16, super::Nth}

mod insert {
    use avl_index::AvlTree;
    use quickcheck::quickcheck;

    #[test]
    fn sets_len() {
        fn test(mut tree: AvlTree<u32, u16>, key: u32, value: u16) -> bool {
            let old_len = tree.len();
            tree.insert(key, value).unwrap();
            tree.len() == old_len + 1
        }

        quickcheck(test as fn(AvlTree<u32, u16>, u32, u16) -> bool);
    }

    #[test]
    fn inserts_entry() {
        fn test(mut tree: AvlTree<u32, u16>, key: u32, value: u16) -> bool {
            let handle = {
                let entry = tree.insert(key, value).unwrap();
                if (*entry.key(), *entry.value()) != (key, value) { return false; }
                entry.handle()
            };

            tree.contains_key(&key) &&
            tree.lookup(handle).map(|e| (*e.key(), *e.value())) == Some((key, value)) &&
            tree.find_all(&key).unwrap().last().map(|e| e.handle()) == Some(handle)
        }

        quickcheck(test as fn(AvlTree<u32, u16>, u32, u16) -> bool);
    }

    #[test]
    fn affects_no_others() {
        fn test(mut tree: AvlTree<u32, u16>, key: u32, value: u16) -> bool {
            let old_tree = tree.clone();
            tree.insert(key, value).unwrap();

            tree.iter().filter(|e| *e.0 != key).collect::<Vec<_>>() ==
                old_tree.iter().filter(|e| *e.0 != key).collect::<Vec<_>>()
        }

        quickcheck(test as fn(AvlTree<u32, u16>, u32, u16) -> bool);
    }

    #[test]
    fn stays_balanced() {
        fn test(mut tree: AvlTree<u32, u16>, keys: Vec<u32>) -> bool {
            for key in keys { tree.insert(key, 0).unwrap(); }
            super::height_is_logarithmic(&tree)
        }

        quickcheck(test as fn(AvlTree<u32, u16>, Vec<u32>) -> bool);
    }
}

mod find {
    use avl_index::AvlTree;
    use quickcheck::quickcheck;

    #[test]
    fn agrees_with_iter() {
        fn test(tree: AvlTree<u32, u16>, key: u32) -> bool {
            tree.find(&key).unwrap().map(|e| (e.key(), e.value())) ==
                tree.iter().find(|e| *e.0 == key)
        }

        quickcheck(test as fn(AvlTree<u32, u16>, u32) -> bool);
    }

    #[test]
    fn is_idempotent() {
        fn test(tree: AvlTree<u32, u16>, key: u32) -> bool {
            tree.find(&key).unwrap() == tree.find(&key).unwrap()
        }

        quickcheck(test as fn(AvlTree<u32, u16>, u32) -> bool);
    }

    #[test]
    fn all_agrees_with_iter() {
        fn test(tree: AvlTree<u8, u16>, key: u8) -> bool {
            tree.find_all(&key).unwrap().map(|e| (e.key(), e.value())).collect::<Vec<_>>() ==
                tree.iter().filter(|e| *e.0 == key).collect::<Vec<_>>()
        }

        quickcheck(test as fn(AvlTree<u8, u16>, u8) -> bool);
    }
}

mod iter {
    use avl_index::AvlTree;
    use quickcheck::quickcheck;

    #[test]
    fn ascends() {
        fn test(tree: AvlTree<u32, u16>) -> bool {
            tree.iter().zip(tree.iter().skip(1)).all(|(e1, e2)| e1.0 <= e2.0)
        }

        quickcheck(test as fn(AvlTree<u32, u16>) -> bool);
    }

    #[test]
    fn descends_when_reversed() {
        fn test(tree: AvlTree<u32, u16>) -> bool {
            tree.iter().rev().zip(tree.iter().rev().skip(1)).all(|(e2, e1)| e2.0 >= e1.0)
        }

        quickcheck(test as fn(AvlTree<u32, u16>) -> bool);
    }

    #[test]
    fn size_hint_is_exact() {
        fn test(tree: AvlTree<u32, u16>) -> bool {
            let mut len = tree.len();
            let mut it = tree.iter();

            loop {
                if it.size_hint() != (len, Some(len)) { return false; }
                if it.next().is_none() { break; }
                len -= 1;
            }

            len == 0 && it.size_hint() == (0, Some(0))
        }

        quickcheck(test as fn(AvlTree<u32, u16>) -> bool);
    }

    #[test]
    fn meets_in_the_middle() {
        fn test(tree: AvlTree<u32, u16>) -> bool {
            let mut it = tree.entries();
            let mut seen = vec![];

            while let Some(front) = it.next() {
                seen.push(front.handle());
                if let Some(back) = it.next_back() { seen.push(back.handle()); }
            }

            seen.len() == tree.len() && seen.iter().all(|&h| tree.lookup(h).is_some())
        }

        quickcheck(test as fn(AvlTree<u32, u16>) -> bool);
    }
}

#[quickcheck]
fn size_counts_inserts_minus_removes(ops: Vec<(bool, u8)>) -> bool {
    let mut tree = AvlTree::new();
    let mut expected = 0;

    for (insert, key) in ops {
        if insert {
            tree.insert(key, ()).unwrap();
            expected += 1;
        } else if tree.remove_key(&key).unwrap().is_some() {
            expected -= 1;
        }
    }

    tree.len() == expected && Dictionary::size(&tree) == expected
}

#[quickcheck]
fn handles_survive_rebalancing(keys: Vec<u16>) -> bool {
    let mut tree = AvlTree::new();
    let handles: Vec<_> = keys.iter().map(|&k| tree.insert(k, k).unwrap().handle()).collect();

    handles.iter().zip(&keys).all(|(&h, &k)| tree.lookup(h).map(|e| *e.value()) == Some(k))
}

#[quickcheck]
fn removed_handles_are_rejected(keys: Vec<u16>) -> TestResult {
    if keys.is_empty() { return TestResult::discard(); }

    let mut tree = AvlTree::new();
    let handles: Vec<_> = keys.iter().map(|&k| tree.insert(k, ()).unwrap().handle()).collect();

    for &handle in &handles {
        if tree.remove(handle).is_err() { return TestResult::failed(); }
        if tree.remove(handle) != Err(Error::InvalidEntry(handle)) { return TestResult::failed(); }
    }

    TestResult::from_bool(tree.is_empty())
}
