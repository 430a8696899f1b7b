use serde::{Deserialize, Serialize};

use super::{Vertex, Weight};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct WeightedEdge<V> {
    pub tail: V,
    pub head: V,
    pub weight: Weight,
}

impl<V: Vertex> WeightedEdge<V> {
    pub fn new(tail: V, head: V, weight: Weight) -> WeightedEdge<V> {
        WeightedEdge { tail, head, weight }
    }

    pub fn reversed(&self) -> WeightedEdge<V> {
        WeightedEdge {
            tail: self.head.clone(),
            head: self.tail.clone(),
            weight: self.weight,
        }
    }

    pub fn tailless(&self) -> TaillessEdge<V> {
        TaillessEdge {
            head: self.head.clone(),
            weight: self.weight,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TaillessEdge<V> {
    pub head: V,
    pub weight: Weight,
}

impl<V: Vertex> TaillessEdge<V> {
    pub fn new(head: V, weight: Weight) -> TaillessEdge<V> {
        TaillessEdge { head, weight }
    }

    pub fn set_tail(&self, tail: V) -> WeightedEdge<V> {
        WeightedEdge {
            tail,
            head: self.head.clone(),
            weight: self.weight,
        }
    }
}
