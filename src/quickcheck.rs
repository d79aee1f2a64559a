use compare::Compare;
use quickcheck::{Arbitrary, Gen};
use super::AvlTree;

impl<K, V, C> Arbitrary for AvlTree<K, V, C>
    where K: Arbitrary, V: Arbitrary, C: 'static + Clone + Compare<K> + Default + Send {

    fn arbitrary(gen: &mut Gen) -> Self {
        let mut tree = AvlTree::default();
        for (key, value) in Vec::<(K, V)>::arbitrary(gen) { let _ = tree.insert(key, value); }
        tree
    }

    fn shrink(&self) -> Box<dyn Iterator<Item = Self>> {
        let vec: Vec<(K, V)> = self.iter().map(|(k, v)| (k.clone(), v.clone())).collect();

        Box::new(vec.shrink().map(|vec| {
            let mut tree = AvlTree::default();
            for (key, value) in vec { let _ = tree.insert(key, value); }
            tree
        }))
    }
}
