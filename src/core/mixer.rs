use fnv::FnvHashMap;

/// The demo's sound slots.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SoundId {
    Kick,
    Scratch,
    Shimmer,
    /// Procedurally rendered pad bed (synth variant only).
    Pad,
}

impl SoundId {
    /// Slots filled from recordings in the sampled variant.
    pub const SAMPLED: [SoundId; 3] = [SoundId::Kick, SoundId::Scratch, SoundId::Shimmer];

    pub fn label(self) -> &'static str {
        match self {
            SoundId::Kick => "kick",
            SoundId::Scratch => "scratch",
            SoundId::Shimmer => "shimmer",
            SoundId::Pad => "pad",
        }
    }
}

/// Decoded buffers by slot. A slot that failed to load stays empty and the
/// layer is silent for the rest of the session.
#[derive(Debug)]
pub struct SoundBank<B> {
    buffers: FnvHashMap<SoundId, B>,
}

impl<B> Default for SoundBank<B> {
    fn default() -> Self {
        Self {
            buffers: FnvHashMap::default(),
        }
    }
}

impl<B> SoundBank<B> {
    pub fn insert(&mut self, id: SoundId, buffer: B) {
        self.buffers.insert(id, buffer);
    }

    pub fn get(&self, id: SoundId) -> Option<&B> {
        self.buffers.get(&id)
    }

    pub fn len(&self) -> usize {
        self.buffers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buffers.is_empty()
    }

    /// Sampled slots that hold no buffer.
    pub fn missing(&self) -> impl Iterator<Item = SoundId> + '_ {
        SoundId::SAMPLED
            .into_iter()
            .filter(|id| !self.buffers.contains_key(id))
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LayerId(u32);

#[derive(Debug)]
struct Layer<S> {
    id: LayerId,
    sound: SoundId,
    source: S,
}

/// Running loop layers. Every `add` is a new, independent layer; the same
/// sound may be layered any number of times.
#[derive(Debug)]
pub struct LoopLayers<S> {
    layers: Vec<Layer<S>>,
    next_id: u32,
}

impl<S> Default for LoopLayers<S> {
    fn default() -> Self {
        Self {
            layers: Vec::new(),
            next_id: 0,
        }
    }
}

impl<S> LoopLayers<S> {
    pub fn add(&mut self, sound: SoundId, source: S) -> LayerId {
        let id = LayerId(self.next_id);
        self.next_id = self.next_id.wrapping_add(1);
        self.layers.push(Layer { id, sound, source });
        id
    }

    pub fn len(&self) -> usize {
        self.layers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }

    pub fn count_of(&self, sound: SoundId) -> usize {
        self.layers.iter().filter(|l| l.sound == sound).count()
    }

    pub fn remove(&mut self, id: LayerId) -> Option<S> {
        let pos = self.layers.iter().position(|l| l.id == id)?;
        Some(self.layers.remove(pos).source)
    }

    /// Remove every layer, yielding the sources so the caller can stop them.
    pub fn drain(&mut self) -> impl Iterator<Item = S> + '_ {
        self.layers.drain(..).map(|l| l.source)
    }
}
