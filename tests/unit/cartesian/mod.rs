mod permutations;
